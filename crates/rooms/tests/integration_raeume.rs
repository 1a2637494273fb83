//! Integration-Tests fuer den kompletten Raum-Lebenszyklus (MemoryStore)

use std::sync::Arc;

use redezeit_core::UserId;
use redezeit_ledger::LedgerError;
use redezeit_rooms::{BenutzerProfil, RaumService};
use redezeit_store::MemoryStore;

fn service() -> Arc<RaumService<MemoryStore>> {
    RaumService::neu(Arc::new(MemoryStore::neu()), 10)
}

#[tokio::test]
async fn raum_erstellen_beitreten_und_feedback() {
    let service = service();

    let alice = BenutzerProfil::neu(UserId::new(), "Alice");
    let bob = BenutzerProfil {
        id: UserId::new(),
        fullname: "Bob".into(),
        avatar: Some("https://example.org/bob.png".into()),
    };

    let raum = service
        .raum_erstellen("Rustacean Lounge", alice.clone())
        .await
        .expect("Raum erstellen fehlgeschlagen");

    // Bob tritt bei: Anfangsbudget 10 Minuten ab now
    let grant = service
        .raum_beitreten(&raum.id, &bob, 0)
        .await
        .expect("Beitritt fehlgeschlagen");
    assert_eq!(grant.expiry_ts, 600_000);
    assert_eq!(grant.allotted_minutes, 10);

    // Alice bekommt die Beitritts-Benachrichtigung
    let postfach = service
        .benachrichtigungen()
        .liste(&alice.id)
        .await
        .unwrap();
    assert_eq!(postfach.len(), 1);
    assert_eq!(postfach[0].title, "Bob has joined Rustacean Lounge");
    assert_eq!(postfach[0].image.as_deref(), Some("https://example.org/bob.png"));

    // Peer-Feedback: erst Daumen runter (Kappung bei 1 Minute), dann hoch
    let nach_runter = service
        .ledger()
        .feedback_anwenden(&raum.id, &bob.id, "thumbsDown", 0)
        .await
        .unwrap();
    assert_eq!(nach_runter.expiry_ts, 540_000);

    let nach_hoch = service
        .ledger()
        .feedback_anwenden(&raum.id, &bob.id, "thumbsUp", 0)
        .await
        .unwrap();
    assert_eq!(nach_hoch.expiry_ts, 840_000);
    assert_eq!(nach_hoch.thumbs_up, 1);
    assert_eq!(nach_hoch.thumbs_down, 1);
}

#[tokio::test]
async fn wiederbeitritt_vergibt_kein_neues_budget() {
    let service = service();
    let alice = BenutzerProfil::neu(UserId::new(), "Alice");
    let bob = BenutzerProfil::neu(UserId::new(), "Bob");

    let raum = service.raum_erstellen("Lounge", alice).await.unwrap();

    let erster = service.raum_beitreten(&raum.id, &bob, 0).await.unwrap();
    // Spaeterer Wiederbeitritt: der alte Grant bleibt, kein frisches Budget
    let zweiter = service
        .raum_beitreten(&raum.id, &bob, 5_000_000)
        .await
        .unwrap();
    assert_eq!(zweiter, erster);
}

#[tokio::test]
async fn ersteller_beitritt_ohne_benachrichtigung() {
    let service = service();
    let alice = BenutzerProfil::neu(UserId::new(), "Alice");

    let raum = service.raum_erstellen("Lounge", alice.clone()).await.unwrap();
    service.raum_beitreten(&raum.id, &alice, 0).await.unwrap();

    // Eigener Beitritt erzeugt keinen Postfach-Eintrag
    assert_eq!(
        service.benachrichtigungen().anzahl(&alice.id).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn raumliste_und_aenderungs_feed() {
    let service = service();
    let alice = BenutzerProfil::neu(UserId::new(), "Alice");

    let mut rx = service.aenderungen_abonnieren();

    service.raum_erstellen("Eins", alice.clone()).await.unwrap();
    service.raum_erstellen("Zwei", alice).await.unwrap();

    let raeume = service.raeume_auflisten().await.unwrap();
    assert_eq!(raeume.len(), 2);

    // Beide Schreibvorgaenge landen im Feed, wie bei einer Live-Raumliste
    let mut gesehen = 0;
    while let Ok(event) = rx.try_recv() {
        assert!(event.schluessel.starts_with("rooms/"));
        gesehen += 1;
    }
    assert_eq!(gesehen, 2);
}

#[tokio::test]
async fn feedback_auf_nicht_sprecher_schlaegt_fehl() {
    let service = service();
    let alice = BenutzerProfil::neu(UserId::new(), "Alice");
    let raum = service.raum_erstellen("Lounge", alice).await.unwrap();

    let e = service
        .ledger()
        .feedback_anwenden(&raum.id, &UserId::new(), "thumbsUp", 0)
        .await
        .unwrap_err();
    assert!(matches!(e, LedgerError::GrantNichtGefunden { .. }));
}

#[tokio::test]
async fn mehrere_sprecher_haben_getrennte_budgets() {
    let service = service();
    let alice = BenutzerProfil::neu(UserId::new(), "Alice");
    let raum = service.raum_erstellen("Lounge", alice).await.unwrap();

    let bob = BenutzerProfil::neu(UserId::new(), "Bob");
    let carol = BenutzerProfil::neu(UserId::new(), "Carol");
    service.raum_beitreten(&raum.id, &bob, 0).await.unwrap();
    service.raum_beitreten(&raum.id, &carol, 0).await.unwrap();

    service
        .ledger()
        .feedback_anwenden(&raum.id, &bob.id, "thumbsDown", 0)
        .await
        .unwrap();

    let bob_grant = service.ledger().grant_laden(&raum.id, &bob.id).await.unwrap();
    let carol_grant = service
        .ledger()
        .grant_laden(&raum.id, &carol.id)
        .await
        .unwrap();
    assert_eq!(bob_grant.expiry_ts, 540_000);
    assert_eq!(carol_grant.expiry_ts, 600_000);

    let geladen = service.raum_laden(&raum.id).await.unwrap();
    assert_eq!(geladen.speakers.len(), 2);
}
