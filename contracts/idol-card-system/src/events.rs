use soroban_sdk::{Address, BytesN, contractevent};

use crate::CardKey;

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Upgrade {
    pub owner: Address,
    pub wasm_hash: BytesN<32>,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManagersLinked {
    pub card_manager: Address,
    pub trade_manager: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Purchase {
    #[topic]
    pub buyer: Address,
    #[topic]
    pub seller: Address,
    pub offer_id: u64,
    pub card: CardKey,
    pub quantity: u32,
    pub amount: i128,
}
