//! Marketplace offers and settlement

use soroban_sdk::{contractimpl, contracttype, log, panic_with_error, Address, BytesN, Env};

use crate::errors::TradeManagerError;
use crate::{
    catalog, events, CardKey, Linkage, Offer, OfferStatus, Settlement, TradeManager,
    TradeManagerArgs, TradeManagerClient, TradeManagerTrait,
};

const DAY_IN_LEDGERS: u32 = 17_280;
const BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const LIFETIME_THRESHOLD: u32 = BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
pub enum DataKey {
    Owner,
    MainContract,
    CardManager,
    NextOfferId,
}

#[contracttype]
pub enum OfferStorageKey {
    Offer(u64),
}


#[contractimpl]
impl TradeManagerTrait for TradeManager {

    fn __constructor(e: &Env, owner: Address, card_manager: Address) {
        e.storage().instance().set(&DataKey::Owner, &owner);
        e.storage().instance().set(&DataKey::CardManager, &card_manager);
        e.storage().instance().set(&DataKey::MainContract, &Linkage::Unlinked);
        e.storage().instance().set(&DataKey::NextOfferId, &0u64);
    }

    fn upgrade(e: &Env, wasm_hash: BytesN<32>) {
        let owner = Self::owner(e);
        owner.require_auth();

        e.deployer().update_current_contract_wasm(wasm_hash.clone());

        events::Upgrade { owner, wasm_hash }.publish(e);
    }

    fn set_main_contract(e: &Env, main: Address) -> Result<(), TradeManagerError> {
        Self::owner(e).require_auth();

        if Self::main_contract(e).is_some() {
            return Err(TradeManagerError::AlreadyLinked);
        }

        e.storage().instance().set(&DataKey::MainContract, &Linkage::Linked(main.clone()));
        extend_instance(e);

        events::MainContractSet { main }.publish(e);
        Ok(())
    }

    fn main_contract(e: &Env) -> Option<Address> {
        match e.storage().instance().get(&DataKey::MainContract) {
            Some(Linkage::Linked(main)) => Some(main),
            _ => None,
        }
    }

    fn list_offer(
        e: &Env,
        caller: Address,
        seller: Address,
        card: CardKey,
        quantity: u32,
        unit_price: i128,
    ) -> Result<u64, TradeManagerError> {
        require_main(e, &caller)?;

        if quantity == 0 {
            return Err(TradeManagerError::InvalidQuantity);
        }
        if unit_price < 0 {
            return Err(TradeManagerError::InvalidPrice);
        }

        let offer_id = Self::offer_count(e);
        let offer = Offer {
            seller: seller.clone(),
            card: card.clone(),
            quantity,
            unit_price,
            status: OfferStatus::Open,
        };
        write_offer(e, offer_id, &offer);

        let next_id = offer_id.checked_add(1).ok_or(TradeManagerError::MathOverflow)?;
        e.storage().instance().set(&DataKey::NextOfferId, &next_id);
        extend_instance(e);

        events::OfferListed { seller, offer_id, card, quantity, unit_price }.publish(e);
        Ok(offer_id)
    }

    fn cancel_offer(e: &Env, caller: Address, offer_id: u64, requester: Address) -> Result<(), TradeManagerError> {
        require_main(e, &caller)?;

        let mut offer = read_open_offer(e, offer_id)?;
        if offer.seller != requester {
            log!(e, "cancel requested by non-seller", offer_id, requester);
            return Err(TradeManagerError::NotSeller);
        }

        offer.status = OfferStatus::Cancelled;
        write_offer(e, offer_id, &offer);
        extend_instance(e);

        events::OfferCancelled { seller: offer.seller, offer_id }.publish(e);
        Ok(())
    }

    fn settle_offer(
        e: &Env,
        caller: Address,
        offer_id: u64,
        buyer: Address,
        payment: i128,
    ) -> Result<Settlement, TradeManagerError> {
        require_main(e, &caller)?;

        let mut offer = read_open_offer(e, offer_id)?;

        let amount = offer
            .unit_price
            .checked_mul(offer.quantity as i128)
            .ok_or(TradeManagerError::MathOverflow)?;
        if payment != amount {
            log!(e, "payment does not match offer", offer_id, payment, amount);
            return Err(TradeManagerError::PriceMismatch);
        }

        // The listing did not lock the copies, so the seller may have moved them since.
        let held = catalog::Client::new(e, &Self::card_manager(e)).holding(&offer.seller, &offer.card);
        if held < offer.quantity {
            log!(e, "seller no longer holds offered copies", offer_id, held);
            return Err(TradeManagerError::InsufficientHolding);
        }

        offer.status = OfferStatus::Filled;
        write_offer(e, offer_id, &offer);
        extend_instance(e);

        events::OfferFilled {
            seller: offer.seller.clone(),
            buyer: buyer.clone(),
            offer_id,
            amount,
        }
        .publish(e);

        Ok(Settlement {
            offer_id,
            seller: offer.seller,
            buyer,
            card: offer.card,
            quantity: offer.quantity,
            amount,
        })
    }

    fn offer(e: &Env, offer_id: u64) -> Result<Offer, TradeManagerError> {
        e.storage()
            .persistent()
            .get(&OfferStorageKey::Offer(offer_id))
            .ok_or(TradeManagerError::OfferNotFound)
    }

    fn offer_count(e: &Env) -> u64 {
        e.storage().instance().get(&DataKey::NextOfferId).unwrap_or(0)
    }

    fn card_manager(e: &Env) -> Address {
        e.storage()
            .instance()
            .get(&DataKey::CardManager)
            .unwrap_or_else(|| panic_with_error!(e, TradeManagerError::NotInitialized))
    }

    fn owner(e: &Env) -> Address {
        e.storage()
            .instance()
            .get(&DataKey::Owner)
            .unwrap_or_else(|| panic_with_error!(e, TradeManagerError::NotInitialized))
    }

}

fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

/// Authenticates `caller` and checks it is the linked main contract.
fn require_main(e: &Env, caller: &Address) -> Result<(), TradeManagerError> {
    caller.require_auth();

    if TradeManager::main_contract(e).as_ref() != Some(caller) {
        log!(e, "caller is not the main contract", caller.clone());
        return Err(TradeManagerError::Unauthorized);
    }
    Ok(())
}

fn read_open_offer(e: &Env, offer_id: u64) -> Result<Offer, TradeManagerError> {
    let offer = TradeManager::offer(e, offer_id)?;
    if offer.status != OfferStatus::Open {
        return Err(TradeManagerError::NotOpen);
    }
    Ok(offer)
}

fn write_offer(e: &Env, offer_id: u64, offer: &Offer) {
    let key = OfferStorageKey::Offer(offer_id);
    e.storage().persistent().set(&key, offer);
    e.storage().persistent().extend_ttl(&key, LIFETIME_THRESHOLD, BUMP_AMOUNT);
}
