use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// The registry this gate forwards registrations to. It must hold the
    /// registrar role there
    pub registry: Addr,
    /// Blocks that must elapse between a commit and its reveal
    pub min_commit_blocks: u64,
}

/// Fixed at instantiation
pub const CONFIG: Item<Config> = Item::new("config");

/// An opaque declaration of intent to register. Carries no name
#[cw_serde]
pub struct Commitment {
    pub commit_block: u64,
}

/// One commitment slot per address, consumed by a successful reveal
pub const COMMITMENTS: Map<&Addr, Commitment> = Map::new("commitments");
