//! Entry point composing the card manager and the trade manager

use soroban_sdk::{contractimpl, contracttype, log, panic_with_error, token, Address, BytesN, Env, String};

use crate::errors::IdolCardSystemError;
use crate::{
    catalog, events, ledger, CardKey, IdolCardSystem, IdolCardSystemArgs, IdolCardSystemClient,
    IdolCardSystemTrait, Linkage, Managers, Settlement,
};

const DAY_IN_LEDGERS: u32 = 17_280;
const BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const LIFETIME_THRESHOLD: u32 = BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
pub enum DataKey {
    Owner,
    PaymentToken,
    Managers,
}


#[contractimpl]
impl IdolCardSystemTrait for IdolCardSystem {

    fn __constructor(e: &Env, owner: Address, payment_token: Address) {
        e.storage().instance().set(&DataKey::Owner, &owner);
        e.storage().instance().set(&DataKey::PaymentToken, &payment_token);
        e.storage().instance().set(&DataKey::Managers, &Linkage::Unlinked);
    }

    fn upgrade(e: &Env, wasm_hash: BytesN<32>) {
        let owner = Self::owner(e);
        owner.require_auth();

        e.deployer().update_current_contract_wasm(wasm_hash.clone());

        events::Upgrade { owner, wasm_hash }.publish(e);
    }

    fn link_managers(e: &Env, card_manager: Address, trade_manager: Address) -> Result<(), IdolCardSystemError> {
        Self::owner(e).require_auth();

        if let Linkage::Linked(_) = read_linkage(e) {
            return Err(IdolCardSystemError::AlreadyLinked);
        }

        let cards = catalog::Client::new(e, &card_manager);
        let trades = ledger::Client::new(e, &trade_manager);
        if trades.card_manager() != card_manager {
            log!(e, "trade manager reads another card manager", trade_manager);
            return Err(IdolCardSystemError::ManagerMismatch);
        }

        // A manager already wired to this contract by its owner is accepted as is.
        let this = e.current_contract_address();
        let link_cards = needs_link(e, cards.main_contract(), &this)?;
        let link_trades = needs_link(e, trades.main_contract(), &this)?;

        let managers = Managers {
            card_manager: card_manager.clone(),
            trade_manager: trade_manager.clone(),
        };
        e.storage().instance().set(&DataKey::Managers, &Linkage::Linked(managers));
        extend_instance(e);

        if link_cards {
            cards.set_main_contract(&this);
        }
        if link_trades {
            trades.set_main_contract(&this);
        }

        events::ManagersLinked { card_manager, trade_manager }.publish(e);
        Ok(())
    }

    fn set_card_price(
        e: &Env,
        caller: Address,
        price: i128,
        group: String,
        member: String,
        serial_number: String,
        supply: u32,
        uri: String,
    ) -> Result<(), IdolCardSystemError> {
        require_owner(e, &caller)?;
        let managers = read_managers(e)?;

        let card = CardKey { group, member, serial_number };
        let cards = catalog::Client::new(e, &managers.card_manager);
        let this = e.current_contract_address();

        if cards.has_card(&card) {
            cards.set_price(&this, &card, &price);
        } else {
            cards.define_card(&this, &card, &price, &supply, &uri);
        }
        extend_instance(e);
        Ok(())
    }

    fn get_card_price(e: &Env, group: String, member: String, serial_number: String) -> Result<i128, IdolCardSystemError> {
        let managers = read_managers(e)?;

        let card = CardKey { group, member, serial_number };
        Ok(catalog::Client::new(e, &managers.card_manager).price(&card))
    }

    fn mint_card(
        e: &Env,
        caller: Address,
        to: Address,
        group: String,
        member: String,
        serial_number: String,
        quantity: u32,
    ) -> Result<(), IdolCardSystemError> {
        require_owner(e, &caller)?;
        let managers = read_managers(e)?;

        let card = CardKey { group, member, serial_number };
        catalog::Client::new(e, &managers.card_manager).mint_to(
            &e.current_contract_address(),
            &to,
            &card,
            &quantity,
        );
        extend_instance(e);
        Ok(())
    }

    fn list_card(
        e: &Env,
        seller: Address,
        group: String,
        member: String,
        serial_number: String,
        quantity: u32,
        unit_price: i128,
    ) -> Result<u64, IdolCardSystemError> {
        seller.require_auth();
        let managers = read_managers(e)?;

        let card = CardKey { group, member, serial_number };
        let offer_id = ledger::Client::new(e, &managers.trade_manager).list_offer(
            &e.current_contract_address(),
            &seller,
            &card,
            &quantity,
            &unit_price,
        );
        extend_instance(e);
        Ok(offer_id)
    }

    fn cancel_listing(e: &Env, seller: Address, offer_id: u64) -> Result<(), IdolCardSystemError> {
        seller.require_auth();
        let managers = read_managers(e)?;

        ledger::Client::new(e, &managers.trade_manager).cancel_offer(
            &e.current_contract_address(),
            &offer_id,
            &seller,
        );
        extend_instance(e);
        Ok(())
    }

    fn buy_card(e: &Env, buyer: Address, offer_id: u64, payment: i128) -> Result<Settlement, IdolCardSystemError> {
        buyer.require_auth();
        let managers = read_managers(e)?;
        let this = e.current_contract_address();

        // Checks the payment and the seller's holding, then closes the offer.
        let settlement = ledger::Client::new(e, &managers.trade_manager).settle_offer(
            &this,
            &offer_id,
            &buyer,
            &payment,
        );

        catalog::Client::new(e, &managers.card_manager).transfer_holding(
            &this,
            &settlement.seller,
            &buyer,
            &settlement.card,
            &settlement.quantity,
        );

        if settlement.amount > 0 {
            token::Client::new(e, &Self::payment_token(e)).transfer(
                &buyer,
                &settlement.seller,
                &settlement.amount,
            );
        }
        extend_instance(e);

        events::Purchase {
            buyer,
            seller: settlement.seller.clone(),
            offer_id,
            card: settlement.card.clone(),
            quantity: settlement.quantity,
            amount: settlement.amount,
        }
        .publish(e);

        Ok(settlement)
    }

    fn holding(
        e: &Env,
        owner: Address,
        group: String,
        member: String,
        serial_number: String,
    ) -> Result<u32, IdolCardSystemError> {
        let managers = read_managers(e)?;

        let card = CardKey { group, member, serial_number };
        Ok(catalog::Client::new(e, &managers.card_manager).holding(&owner, &card))
    }

    fn card_manager(e: &Env) -> Result<Address, IdolCardSystemError> {
        read_managers(e).map(|managers| managers.card_manager)
    }

    fn trade_manager(e: &Env) -> Result<Address, IdolCardSystemError> {
        read_managers(e).map(|managers| managers.trade_manager)
    }

    fn payment_token(e: &Env) -> Address {
        e.storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .unwrap_or_else(|| panic_with_error!(e, IdolCardSystemError::NotInitialized))
    }

    fn owner(e: &Env) -> Address {
        e.storage()
            .instance()
            .get(&DataKey::Owner)
            .unwrap_or_else(|| panic_with_error!(e, IdolCardSystemError::NotInitialized))
    }

}

fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

/// Whether a manager reporting `current` as its main contract still has to be
/// pointed at `this`.
fn needs_link(e: &Env, current: Option<Address>, this: &Address) -> Result<bool, IdolCardSystemError> {
    match current {
        None => Ok(true),
        Some(main) if main == *this => Ok(false),
        Some(main) => {
            log!(e, "manager linked to another main contract", main);
            Err(IdolCardSystemError::AlreadyLinked)
        }
    }
}

fn read_linkage(e: &Env) -> Linkage {
    e.storage()
        .instance()
        .get(&DataKey::Managers)
        .unwrap_or(Linkage::Unlinked)
}

fn read_managers(e: &Env) -> Result<Managers, IdolCardSystemError> {
    match read_linkage(e) {
        Linkage::Linked(managers) => Ok(managers),
        Linkage::Unlinked => Err(IdolCardSystemError::NotLinked),
    }
}

/// Authenticates `caller` and checks it is the owner.
fn require_owner(e: &Env, caller: &Address) -> Result<(), IdolCardSystemError> {
    caller.require_auth();

    if *caller != IdolCardSystem::owner(e) {
        log!(e, "caller is not the owner", caller.clone());
        return Err(IdolCardSystemError::Unauthorized);
    }
    Ok(())
}
