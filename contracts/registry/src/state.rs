use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Timestamp, Uint128};
use cw_controllers::Admin;
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct SudoParams {
    /// Minimum payment to register or reclaim a name
    pub registration_price: Uint128,
    /// Seconds a registration stays active, also the renewal extension
    pub registration_duration: u64,
    /// Seconds added to a token's expiry on every ownership transfer
    pub transfer_extension: u64,
}

/// Fixed at instantiation, no update path
pub const SUDO_PARAMS: Item<SudoParams> = Item::new("sudo-params");

pub type TokenId = u64;

/// name -> token id; a missing entry is the unregistered sentinel 0
pub const NAMES: Map<&str, TokenId> = Map::new("names");

/// token id -> name, needed to clear the name record on burn-by-id
pub const TOKEN_NAMES: Map<TokenId, String> = Map::new("token-names");

/// token id -> absolute expiry; a token is active iff now < expiry
pub const EXPIRIES: Map<TokenId, Timestamp> = Map::new("expiries");

pub const REGISTRAR_ROLE: &str = "registrar";

/// Addresses holding the registrar role
pub const REGISTRARS: Map<&cosmwasm_std::Addr, bool> = Map::new("registrars");

/// Can grant and revoke the registrar role
pub const ADMIN: Admin = Admin::new("admin");
