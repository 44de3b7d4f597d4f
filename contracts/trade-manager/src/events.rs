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
pub struct MainContractSet {
    #[topic]
    pub main: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfferListed {
    #[topic]
    pub seller: Address,
    #[topic]
    pub offer_id: u64,
    pub card: CardKey,
    pub quantity: u32,
    pub unit_price: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfferCancelled {
    #[topic]
    pub seller: Address,
    #[topic]
    pub offer_id: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfferFilled {
    #[topic]
    pub seller: Address,
    #[topic]
    pub buyer: Address,
    pub offer_id: u64,
    pub amount: i128,
}
