use payloads::{
    ClientError, PartyId, ScanOutcome, TicketStatus, TicketTypeId, requests,
    requests::MAX_TICKETS_PER_PURCHASE,
};
use reqwest::StatusCode;
use rust_decimal::Decimal;

use test_helpers::{assert_status_code, party_details, spawn_app};

#[tokio::test]
async fn customer_buys_tickets() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let owner = app.login_owner().await?;
    let party = app.create_published_party(&owner).await?;
    let customer = app.login_customer().await?;

    let purchase = app.buy_tickets(&customer, &party.party_id, 2).await?;
    assert_eq!(purchase.tickets.len(), 2);
    assert_eq!(purchase.total, Decimal::new(5000, 2));
    assert_eq!(purchase.currency, "EUR");
    assert!(purchase.tickets.iter().all(|t| t.status == TicketStatus::Valid));

    let mine = app.client.my_tickets(&customer).await?;
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|t| t.holder_id == *customer.user_id()));

    let ticket_types = app.client.list_ticket_types(&party.party_id).await?;
    assert_eq!(ticket_types[0].remaining, 98);

    Ok(())
}

#[tokio::test]
async fn drafts_are_not_on_sale() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let owner = app.login_owner().await?;
    let venue = app.create_test_venue(&owner).await?;
    let draft = app
        .client
        .create_party(&owner, &party_details(&venue.venue_id, vec![]))
        .await?;
    let customer = app.login_customer().await?;

    let result = app.buy_tickets(&customer, &draft.party_id, 1).await;
    let error = result.unwrap_err().downcast::<ClientError>()?;
    assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(error.to_string(), "Party is not on sale");

    Ok(())
}

#[tokio::test]
async fn too_many_tickets_are_not_sent() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let customer = app.login_customer().await?;
    let sent = app.backend.request_count();

    let body = requests::PurchaseTickets {
        party_id: PartyId("p".into()),
        ticket_type_id: TicketTypeId("t".into()),
        quantity: MAX_TICKETS_PER_PURCHASE + 1,
    };
    let result = app.client.purchase_tickets(&customer, &body).await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert_eq!(app.backend.request_count(), sent);

    Ok(())
}

#[tokio::test]
async fn scanning_admits_a_ticket_once() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let owner = app.login_owner().await?;
    let party = app.create_published_party(&owner).await?;
    let customer = app.login_customer().await?;
    let purchase = app.buy_tickets(&customer, &party.party_id, 1).await?;
    let staff = app.login_staff().await?;

    let scan = requests::ScanTicket {
        party_id: party.party_id.clone(),
        qr_code: purchase.tickets[0].qr_code.clone(),
    };
    let first = app.client.scan_ticket(&staff, &scan).await?;
    assert_eq!(first.outcome, ScanOutcome::Admitted);
    assert!(first.outcome.is_admitted());
    let ticket = first.ticket.expect("admitted ticket");
    assert_eq!(ticket.status, TicketStatus::Used);
    assert!(ticket.scanned_at.is_some());

    let second = app.client.scan_ticket(&staff, &scan).await?;
    assert_eq!(second.outcome, ScanOutcome::AlreadyScanned);

    Ok(())
}

#[tokio::test]
async fn scanning_unknown_and_misplaced_codes() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let owner = app.login_owner().await?;
    let party = app.create_published_party(&owner).await?;
    let other = app.create_published_party(&owner).await?;
    let customer = app.login_customer().await?;
    let purchase = app.buy_tickets(&customer, &party.party_id, 1).await?;

    let unknown = requests::ScanTicket {
        party_id: party.party_id.clone(),
        qr_code: "ENC-not-a-ticket".into(),
    };
    let result = app.client.scan_ticket(&owner, &unknown).await?;
    assert_eq!(result.outcome, ScanOutcome::Unknown);
    assert_eq!(result.ticket, None);

    let wrong_door = requests::ScanTicket {
        party_id: other.party_id,
        qr_code: purchase.tickets[0].qr_code.clone(),
    };
    let result = app.client.scan_ticket(&owner, &wrong_door).await?;
    assert_eq!(result.outcome, ScanOutcome::WrongParty);

    Ok(())
}

#[tokio::test]
async fn customers_cannot_scan() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;
    let owner = app.login_owner().await?;
    let party = app.create_published_party(&owner).await?;
    let customer = app.login_customer().await?;
    let purchase = app.buy_tickets(&customer, &party.party_id, 1).await?;

    let scan = requests::ScanTicket {
        party_id: party.party_id,
        qr_code: purchase.tickets[0].qr_code.clone(),
    };
    let result = app.client.scan_ticket(&customer, &scan).await;
    assert_status_code(result, StatusCode::FORBIDDEN);

    Ok(())
}
