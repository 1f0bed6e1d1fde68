use society_admin::i18n::Locale;
use society_admin::tickets::{
    InfoPanel, ModalCommand, ModalRequest, PriceGroup, PriceGroupId, PurchaseForm,
    PurchaseNavigator, TicketGroup, TicketGroupId, TicketSelection, TicketType,
};

fn concert_form() -> PurchaseForm {
    let selection = TicketSelection::new(
        6,
        vec![TicketGroup {
            id: TicketGroupId(10),
            name: "Konsert".to_string(),
            limit: Some(3),
        }],
        vec![
            PriceGroup {
                id: PriceGroupId(1),
                ticket_group: TicketGroupId(10),
                name: "Medlem".to_string(),
                price: 100,
                option_count: 4,
            },
            PriceGroup {
                id: PriceGroupId(2),
                ticket_group: TicketGroupId(10),
                name: "Ikke-medlem".to_string(),
                price: 200,
                option_count: 4,
            },
        ],
    )
    .expect("valid selection");
    PurchaseForm::new(selection)
}

#[test]
fn buyer_completes_a_card_purchase() {
    let mut navigator = PurchaseNavigator::new(Locale::English, false);
    let click = navigator.on_purchase_click("42", "/en/events/42/buy");
    assert_eq!(click.push_hash, "#42/buy");
    assert!(navigator.accept_response(click.request.generation));

    let mut form = concert_form();
    let summary = form
        .selection
        .select(PriceGroupId(1), 2)
        .expect("within limit");
    assert_eq!(summary.total_cost, 200);

    let enabled: Vec<u32> = form
        .selection
        .options(PriceGroupId(2))
        .expect("known price group")
        .into_iter()
        .filter(|option| option.enabled)
        .map(|option| option.value)
        .collect();
    assert_eq!(enabled, vec![0, 1]);

    form.contact.choose_ticket_type(TicketType::Card);
    form.contact.set_membercard("1234567");
    let validation = form.validate();
    assert!(validation.submit_enabled);
    assert_eq!(validation.info_panel, InfoPanel::Ticketless);

    assert_eq!(navigator.on_modal_closed(), "#");
    let reopened = navigator.on_popstate("#42/buy");
    assert_eq!(
        reopened,
        ModalCommand::Open(ModalRequest {
            url: "/en/events/42/buy".to_string(),
            generation: navigator.generation(),
        })
    );
}
