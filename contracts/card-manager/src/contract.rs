//! Card catalog and holdings

use soroban_sdk::{contractimpl, contracttype, log, panic_with_error, Address, BytesN, Env, IntoVal, String, Val};

use crate::errors::CardManagerError;
use crate::{events, Card, CardKey, CardManager, CardManagerArgs, CardManagerClient, CardManagerTrait, Linkage};

const DAY_IN_LEDGERS: u32 = 17_280;
const BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const LIFETIME_THRESHOLD: u32 = BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
pub enum DataKey {
    Owner,
    MainContract,
    Name,
    Symbol,
}

#[contracttype]
pub enum CardStorageKey {
    Card(CardKey),
    Minted(CardKey),
    Holding(Address /* owner */, CardKey),
    CardCount,
    CardAt(u32),
}


#[contractimpl]
impl CardManagerTrait for CardManager {

    fn __constructor(e: &Env, owner: Address, name: String, symbol: String) {
        e.storage().instance().set(&DataKey::Owner, &owner);
        e.storage().instance().set(&DataKey::MainContract, &Linkage::Unlinked);

        e.storage().instance().set(&DataKey::Name, &name);
        e.storage().instance().set(&DataKey::Symbol, &symbol);
    }

    fn upgrade(e: &Env, wasm_hash: BytesN<32>) {
        let owner = Self::owner(e);
        owner.require_auth();

        e.deployer().update_current_contract_wasm(wasm_hash.clone());

        events::Upgrade { owner, wasm_hash }.publish(e);
    }

    fn set_main_contract(e: &Env, main: Address) -> Result<(), CardManagerError> {
        Self::owner(e).require_auth();

        if let Linkage::Linked(_) = read_linkage(e) {
            return Err(CardManagerError::AlreadyLinked);
        }

        e.storage().instance().set(&DataKey::MainContract, &Linkage::Linked(main.clone()));
        extend_instance(e);

        events::MainContractSet { main }.publish(e);
        Ok(())
    }

    fn main_contract(e: &Env) -> Option<Address> {
        match read_linkage(e) {
            Linkage::Linked(main) => Some(main),
            Linkage::Unlinked => None,
        }
    }

    fn define_card(
        e: &Env,
        caller: Address,
        card: CardKey,
        price: i128,
        supply: u32,
        uri: String,
    ) -> Result<(), CardManagerError> {
        require_main(e, &caller)?;

        if price < 0 {
            return Err(CardManagerError::InvalidPrice);
        }
        if supply == 0 {
            return Err(CardManagerError::InvalidQuantity);
        }

        let card_key = CardStorageKey::Card(card.clone());
        if e.storage().persistent().has(&card_key) {
            log!(e, "card already defined", card);
            return Err(CardManagerError::DuplicateCard);
        }

        let definition = Card { price, total_supply: supply, uri: uri.clone() };
        e.storage().persistent().set(&card_key, &definition);
        e.storage().persistent().extend_ttl(&card_key, LIFETIME_THRESHOLD, BUMP_AMOUNT);

        let minted_key = CardStorageKey::Minted(card.clone());
        e.storage().persistent().set(&minted_key, &0u32);
        e.storage().persistent().extend_ttl(&minted_key, LIFETIME_THRESHOLD, BUMP_AMOUNT);

        let index = Self::card_count(e);
        let count = index.checked_add(1).ok_or(CardManagerError::MathOverflow)?;
        write_persistent(e, &CardStorageKey::CardAt(index), &card);
        write_persistent(e, &CardStorageKey::CardCount, &count);
        extend_instance(e);

        events::CardDefined { card, price, total_supply: supply, uri }.publish(e);
        Ok(())
    }

    fn set_price(e: &Env, caller: Address, card: CardKey, price: i128) -> Result<(), CardManagerError> {
        require_main(e, &caller)?;

        if price < 0 {
            return Err(CardManagerError::InvalidPrice);
        }

        let mut definition = read_card(e, &card)?;
        let old_price = definition.price;
        definition.price = price;

        write_persistent(e, &CardStorageKey::Card(card.clone()), &definition);
        extend_instance(e);

        events::PriceUpdated { card, old_price, new_price: price }.publish(e);
        Ok(())
    }

    fn price(e: &Env, card: CardKey) -> Result<i128, CardManagerError> {
        read_card(e, &card).map(|definition| definition.price)
    }

    fn card(e: &Env, card: CardKey) -> Result<Card, CardManagerError> {
        read_card(e, &card)
    }

    fn has_card(e: &Env, card: CardKey) -> bool {
        e.storage().persistent().has(&CardStorageKey::Card(card))
    }

    fn card_count(e: &Env) -> u32 {
        e.storage()
            .persistent()
            .get(&CardStorageKey::CardCount)
            .unwrap_or(0)
    }

    fn card_at(e: &Env, index: u32) -> Result<CardKey, CardManagerError> {
        e.storage()
            .persistent()
            .get(&CardStorageKey::CardAt(index))
            .ok_or(CardManagerError::CardNotFound)
    }

    fn mint_to(e: &Env, caller: Address, to: Address, card: CardKey, quantity: u32) -> Result<(), CardManagerError> {
        require_main(e, &caller)?;

        if quantity == 0 {
            return Err(CardManagerError::InvalidQuantity);
        }

        let definition = read_card(e, &card)?;
        let minted = Self::minted(e, card.clone())
            .checked_add(quantity)
            .ok_or(CardManagerError::MathOverflow)?;
        if minted > definition.total_supply {
            log!(e, "supply exceeded", card, minted, definition.total_supply);
            return Err(CardManagerError::SupplyExceeded);
        }

        let balance = Self::holding(e, to.clone(), card.clone())
            .checked_add(quantity)
            .ok_or(CardManagerError::MathOverflow)?;

        write_persistent(e, &CardStorageKey::Minted(card.clone()), &minted);
        write_holding(e, &to, &card, balance);
        extend_instance(e);

        events::Minted { to, card, quantity }.publish(e);
        Ok(())
    }

    fn transfer_holding(
        e: &Env,
        caller: Address,
        from: Address,
        to: Address,
        card: CardKey,
        quantity: u32,
    ) -> Result<(), CardManagerError> {
        require_main(e, &caller)?;

        if quantity == 0 {
            return Err(CardManagerError::InvalidQuantity);
        }
        if !Self::has_card(e, card.clone()) {
            return Err(CardManagerError::CardNotFound);
        }

        let from_balance = Self::holding(e, from.clone(), card.clone());
        if from_balance < quantity {
            log!(e, "insufficient holding", from, from_balance, quantity);
            return Err(CardManagerError::InsufficientHolding);
        }

        if from != to {
            let to_balance = Self::holding(e, to.clone(), card.clone())
                .checked_add(quantity)
                .ok_or(CardManagerError::MathOverflow)?;
            write_holding(e, &from, &card, from_balance - quantity);
            write_holding(e, &to, &card, to_balance);
        }
        extend_instance(e);

        events::HoldingTransferred { from, to, card, quantity }.publish(e);
        Ok(())
    }

    fn holding(e: &Env, owner: Address, card: CardKey) -> u32 {
        e.storage()
            .persistent()
            .get(&CardStorageKey::Holding(owner, card))
            .unwrap_or(0)
    }

    fn minted(e: &Env, card: CardKey) -> u32 {
        e.storage()
            .persistent()
            .get(&CardStorageKey::Minted(card))
            .unwrap_or(0)
    }

    fn owner(e: &Env) -> Address {
        e.storage()
            .instance()
            .get(&DataKey::Owner)
            .unwrap_or_else(|| panic_with_error!(e, CardManagerError::NotInitialized))
    }

    fn name(e: &Env) -> String {
        e.storage()
            .instance()
            .get(&DataKey::Name)
            .unwrap_or_else(|| String::from_str(e, ""))
    }

    fn symbol(e: &Env) -> String {
        e.storage()
            .instance()
            .get(&DataKey::Symbol)
            .unwrap_or_else(|| String::from_str(e, ""))
    }

}

fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

fn write_persistent<V: IntoVal<Env, Val>>(e: &Env, key: &CardStorageKey, value: &V) {
    e.storage().persistent().set(key, value);
    e.storage().persistent().extend_ttl(key, LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

fn read_linkage(e: &Env) -> Linkage {
    e.storage()
        .instance()
        .get(&DataKey::MainContract)
        .unwrap_or(Linkage::Unlinked)
}

/// Authenticates `caller` and checks it is the linked main contract.
fn require_main(e: &Env, caller: &Address) -> Result<(), CardManagerError> {
    caller.require_auth();

    match read_linkage(e) {
        Linkage::Linked(main) if main == *caller => Ok(()),
        _ => {
            log!(e, "caller is not the main contract", caller.clone());
            Err(CardManagerError::Unauthorized)
        }
    }
}

fn read_card(e: &Env, card: &CardKey) -> Result<Card, CardManagerError> {
    e.storage()
        .persistent()
        .get(&CardStorageKey::Card(card.clone()))
        .ok_or(CardManagerError::CardNotFound)
}

// Zero holdings are removed so absence and 0 read the same.
fn write_holding(e: &Env, owner: &Address, card: &CardKey, amount: u32) {
    let key = CardStorageKey::Holding(owner.clone(), card.clone());
    if amount == 0 {
        e.storage().persistent().remove(&key);
    } else {
        write_persistent(e, &key, &amount);
    }
}
