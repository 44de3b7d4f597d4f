extern crate std;

use soroban_sdk::{
    testutils::{storage::Instance as _, Address as _, Ledger as _},
    Address, Env, String,
};

use crate::contract::DataKey;
use crate::{Card, CardKey, CardManager, CardManagerClient, CardManagerError};

const DAY_IN_LEDGERS: u32 = 17_280;

fn create_client<'a>(e: &Env, owner: &Address) -> CardManagerClient<'a> {
    let address = e.register(
        CardManager,
        (
            owner,
            &String::from_str(e, "IdolCard"),
            &String::from_str(e, "IDOL"),
        ),
    );
    CardManagerClient::new(e, &address)
}

fn card_key(e: &Env, group: &str, member: &str, serial_number: &str) -> CardKey {
    CardKey {
        group: String::from_str(e, group),
        member: String::from_str(e, member),
        serial_number: String::from_str(e, serial_number),
    }
}

/// Catalog linked to a stand-in main contract address.
fn setup<'a>(e: &Env) -> (CardManagerClient<'a>, Address) {
    let owner = Address::generate(e);
    let main = Address::generate(e);
    let client = create_client(e, &owner);
    client.set_main_contract(&main);
    (client, main)
}

#[test]
fn test_metadata() {
    let e = Env::default();
    e.mock_all_auths();

    let owner = Address::generate(&e);
    let client = create_client(&e, &owner);

    assert_eq!(client.name(), String::from_str(&e, "IdolCard"));
    assert_eq!(client.symbol(), String::from_str(&e, "IDOL"));
    assert_eq!(client.owner(), owner);
    assert_eq!(client.main_contract(), None);
}

#[test]
fn test_set_main_contract_once() {
    let e = Env::default();
    e.mock_all_auths();

    let owner = Address::generate(&e);
    let main = Address::generate(&e);
    let other = Address::generate(&e);
    let client = create_client(&e, &owner);

    client.set_main_contract(&main);
    assert_eq!(client.main_contract(), Some(main.clone()));

    assert_eq!(
        client.try_set_main_contract(&other),
        Err(Ok(CardManagerError::AlreadyLinked))
    );
    assert_eq!(client.main_contract(), Some(main));
}

#[test]
fn test_set_main_contract_requires_owner() {
    let e = Env::default();

    let owner = Address::generate(&e);
    let main = Address::generate(&e);
    let client = create_client(&e, &owner);

    // No auth mocked: the owner has not signed.
    assert!(client.try_set_main_contract(&main).is_err());
    assert_eq!(client.main_contract(), None);
}

#[test]
fn test_unlinked_catalog_rejects_mutations() {
    let e = Env::default();
    e.mock_all_auths();

    let owner = Address::generate(&e);
    let client = create_client(&e, &owner);
    let card = card_key(&e, "GroupA", "MemberB", "001");

    assert_eq!(
        client.try_define_card(&owner, &card, &100, &100, &String::from_str(&e, "uri")),
        Err(Ok(CardManagerError::Unauthorized))
    );
    assert!(!client.has_card(&card));
}

#[test]
fn test_define_card() {
    let e = Env::default();
    e.mock_all_auths();

    let (client, main) = setup(&e);
    let card = card_key(&e, "GroupA", "MemberB", "001");
    let uri = String::from_str(&e, "ipfs://card/001");

    client.define_card(&main, &card, &100, &100, &uri);

    assert!(client.has_card(&card));
    assert_eq!(client.price(&card), 100);
    assert_eq!(
        client.card(&card),
        Card { price: 100, total_supply: 100, uri: uri.clone() }
    );
    assert_eq!(client.minted(&card), 0);
    assert_eq!(client.card_count(), 1);
    assert_eq!(client.card_at(&0), card);

    assert_eq!(
        client.try_define_card(&main, &card, &5, &5, &uri),
        Err(Ok(CardManagerError::DuplicateCard))
    );
    assert_eq!(client.price(&card), 100);
}

#[test]
fn test_define_card_validation() {
    let e = Env::default();
    e.mock_all_auths();

    let (client, main) = setup(&e);
    let stranger = Address::generate(&e);
    let card = card_key(&e, "GroupA", "MemberB", "001");
    let uri = String::from_str(&e, "uri");

    assert_eq!(
        client.try_define_card(&stranger, &card, &100, &100, &uri),
        Err(Ok(CardManagerError::Unauthorized))
    );
    assert_eq!(
        client.try_define_card(&main, &card, &-1, &100, &uri),
        Err(Ok(CardManagerError::InvalidPrice))
    );
    assert_eq!(
        client.try_define_card(&main, &card, &100, &0, &uri),
        Err(Ok(CardManagerError::InvalidQuantity))
    );
    assert_eq!(client.card_count(), 0);
}

#[test]
fn test_composite_key_is_unambiguous() {
    let e = Env::default();
    e.mock_all_auths();

    let (client, main) = setup(&e);
    let uri = String::from_str(&e, "uri");
    let first = card_key(&e, "AB", "C", "001");
    let second = card_key(&e, "A", "BC", "001");

    client.define_card(&main, &first, &10, &1, &uri);
    client.define_card(&main, &second, &20, &1, &uri);

    assert_eq!(client.price(&first), 10);
    assert_eq!(client.price(&second), 20);
}

#[test]
fn test_set_price() {
    let e = Env::default();
    e.mock_all_auths();

    let (client, main) = setup(&e);
    let stranger = Address::generate(&e);
    let card = card_key(&e, "GroupA", "MemberB", "001");
    let missing = card_key(&e, "GroupA", "MemberB", "002");

    client.define_card(&main, &card, &100, &10, &String::from_str(&e, "uri"));
    client.set_price(&main, &card, &250);
    assert_eq!(client.price(&card), 250);
    assert_eq!(client.card(&card).total_supply, 10);

    assert_eq!(
        client.try_set_price(&stranger, &card, &1),
        Err(Ok(CardManagerError::Unauthorized))
    );
    assert_eq!(
        client.try_set_price(&main, &missing, &1),
        Err(Ok(CardManagerError::CardNotFound))
    );
    assert_eq!(client.try_price(&missing), Err(Ok(CardManagerError::CardNotFound)));
    assert_eq!(client.price(&card), 250);
}

#[test]
fn test_mint_respects_supply() {
    let e = Env::default();
    e.mock_all_auths();

    let (client, main) = setup(&e);
    let card = card_key(&e, "GroupA", "MemberB", "001");
    client.define_card(&main, &card, &100, &25, &String::from_str(&e, "uri"));

    let holders = [Address::generate(&e), Address::generate(&e), Address::generate(&e)];
    let requests = [4u32, 9, 7, 6, 3, 1, 8];

    for (i, quantity) in requests.iter().enumerate() {
        let to = &holders[i % holders.len()];
        let before = client.minted(&card);
        let result = client.try_mint_to(&main, to, &card, quantity);
        if before + quantity <= 25 {
            assert!(result.is_ok());
        } else {
            assert_eq!(result, Err(Ok(CardManagerError::SupplyExceeded)));
        }

        let total: u32 = holders.iter().map(|h| client.holding(h, &card)).sum();
        assert_eq!(total, client.minted(&card));
        assert!(total <= 25);
    }
    assert_eq!(client.minted(&card), 4 + 9 + 7 + 3 + 1);
}

#[test]
fn test_mint_errors() {
    let e = Env::default();
    e.mock_all_auths();

    let (client, main) = setup(&e);
    let holder = Address::generate(&e);
    let card = card_key(&e, "GroupA", "MemberB", "001");

    assert_eq!(
        client.try_mint_to(&main, &holder, &card, &1),
        Err(Ok(CardManagerError::CardNotFound))
    );

    client.define_card(&main, &card, &100, &10, &String::from_str(&e, "uri"));
    assert_eq!(
        client.try_mint_to(&main, &holder, &card, &0),
        Err(Ok(CardManagerError::InvalidQuantity))
    );
    assert_eq!(
        client.try_mint_to(&holder, &holder, &card, &1),
        Err(Ok(CardManagerError::Unauthorized))
    );
    assert_eq!(client.holding(&holder, &card), 0);
}

#[test]
fn test_transfer_holding_round_trip() {
    let e = Env::default();
    e.mock_all_auths();

    let (client, main) = setup(&e);
    let a = Address::generate(&e);
    let b = Address::generate(&e);
    let card = card_key(&e, "GroupA", "MemberB", "001");

    client.define_card(&main, &card, &100, &100, &String::from_str(&e, "uri"));
    client.mint_to(&main, &a, &card, &10);
    client.mint_to(&main, &b, &card, &2);

    client.transfer_holding(&main, &a, &b, &card, &4);
    assert_eq!(client.holding(&a, &card), 6);
    assert_eq!(client.holding(&b, &card), 6);

    client.transfer_holding(&main, &b, &a, &card, &4);
    assert_eq!(client.holding(&a, &card), 10);
    assert_eq!(client.holding(&b, &card), 2);
}

#[test]
fn test_transfer_holding_insufficient() {
    let e = Env::default();
    e.mock_all_auths();

    let (client, main) = setup(&e);
    let a = Address::generate(&e);
    let b = Address::generate(&e);
    let card = card_key(&e, "GroupA", "MemberB", "001");

    client.define_card(&main, &card, &100, &100, &String::from_str(&e, "uri"));
    client.mint_to(&main, &a, &card, &3);

    assert_eq!(
        client.try_transfer_holding(&main, &a, &b, &card, &4),
        Err(Ok(CardManagerError::InsufficientHolding))
    );
    assert_eq!(
        client.try_transfer_holding(&a, &a, &b, &card, &1),
        Err(Ok(CardManagerError::Unauthorized))
    );
    assert_eq!(client.holding(&a, &card), 3);
    assert_eq!(client.holding(&b, &card), 0);

    // Emptying a holding reads back as zero.
    client.transfer_holding(&main, &a, &b, &card, &3);
    assert_eq!(client.holding(&a, &card), 0);
    assert_eq!(client.holding(&b, &card), 3);
}

#[test]
fn test_owner_not_initialized() {
    let e = Env::default();

    let owner = Address::generate(&e);
    let client = create_client(&e, &owner);

    e.as_contract(&client.address, || e.storage().instance().remove(&DataKey::Owner));

    assert_eq!(
        client.try_owner(),
        Err(Ok(soroban_sdk::Error::from(CardManagerError::NotInitialized)))
    );
}

#[test]
fn test_card_index() {
    let e = Env::default();
    e.mock_all_auths();

    let (client, main) = setup(&e);
    let uri = String::from_str(&e, "uri");
    let instance_entries = || e.as_contract(&client.address, || e.storage().instance().all().len());

    let before = instance_entries();
    let serials = ["001", "002", "003", "004", "005", "006", "007", "008", "009", "010"];
    for serial_number in serials {
        client.define_card(&main, &card_key(&e, "GroupA", "MemberB", serial_number), &10, &1, &uri);
    }

    // The index lives in persistent entries, so instance storage stays the
    // same size however many cards are defined.
    assert_eq!(instance_entries(), before);

    assert_eq!(client.card_count(), serials.len() as u32);
    for (i, serial_number) in serials.iter().enumerate() {
        assert_eq!(client.card_at(&(i as u32)), card_key(&e, "GroupA", "MemberB", serial_number));
    }
    assert_eq!(
        client.try_card_at(&(serials.len() as u32)),
        Err(Ok(CardManagerError::CardNotFound))
    );

    // A rejected duplicate is not indexed twice.
    let _ = client.try_define_card(&main, &card_key(&e, "GroupA", "MemberB", "001"), &10, &1, &uri);
    assert_eq!(client.card_count(), serials.len() as u32);
}

#[test]
fn test_mutations_extend_instance_ttl() {
    let e = Env::default();
    e.mock_all_auths();

    let (client, main) = setup(&e);
    let a = Address::generate(&e);
    let b = Address::generate(&e);
    let card = card_key(&e, "GroupA", "MemberB", "001");
    let instance_ttl = || e.as_contract(&client.address, || e.storage().instance().get_ttl());
    let advance_days = |days: u32| {
        e.ledger().set_sequence_number(e.ledger().sequence() + days * DAY_IN_LEDGERS);
    };

    client.define_card(&main, &card, &100, &100, &String::from_str(&e, "uri"));
    assert_eq!(instance_ttl(), 30 * DAY_IN_LEDGERS);

    advance_days(2);
    assert_eq!(instance_ttl(), 28 * DAY_IN_LEDGERS);
    client.mint_to(&main, &a, &card, &10);
    assert_eq!(instance_ttl(), 30 * DAY_IN_LEDGERS);

    advance_days(2);
    client.transfer_holding(&main, &a, &b, &card, &4);
    assert_eq!(instance_ttl(), 30 * DAY_IN_LEDGERS);

    advance_days(2);
    client.set_price(&main, &card, &150);
    assert_eq!(instance_ttl(), 30 * DAY_IN_LEDGERS);
}
