use soroban_sdk::{Address, BytesN, String, contractevent};

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
pub struct CardDefined {
    #[topic]
    pub card: CardKey,
    pub price: i128,
    pub total_supply: u32,
    pub uri: String,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceUpdated {
    #[topic]
    pub card: CardKey,
    pub old_price: i128,
    pub new_price: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Minted {
    #[topic]
    pub to: Address,
    #[topic]
    pub card: CardKey,
    pub quantity: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HoldingTransferred {
    #[topic]
    pub from: Address,
    #[topic]
    pub to: Address,
    pub card: CardKey,
    pub quantity: u32,
}
