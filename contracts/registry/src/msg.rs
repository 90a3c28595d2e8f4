use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Timestamp, Uint128};
use cw721::Expiration;

use crate::state::TokenId;

#[cw_serde]
pub struct InstantiateMsg {
    /// Minimum payment to register or reclaim a name
    pub registration_price: Uint128,
    /// Seconds a registration stays active, also the renewal extension
    pub registration_duration: u64,
    /// Seconds added to a token's expiry on every ownership transfer
    pub transfer_extension: u64,
    /// Role admin, defaults to the instantiator
    pub admin: Option<String>,
}

/// A name or the id of the token bound to it
#[cw_serde]
pub enum NameRef {
    Name(String),
    TokenId(TokenId),
}

// Registration, renewal, and release are the native surface.
// The rest are inherited from cw721 and converted in the execute dispatch.
#[cw_serde]
pub enum ExecuteMsg {
    /// Mint or reclaim a name for `owner`. Registrar role only
    RegisterName { name: String, owner: String },
    /// Extend a registration forward from max(now, expiry). Free
    RenewName { token_id: TokenId },
    /// Burn the token, clear the name record, refund the fee to the owner
    ReleaseName { handle: NameRef },
    /// Grant a role to an address. Admin only
    GrantRole { role: String, address: String },
    /// Revoke a role from an address. Admin only
    RevokeRole { role: String, address: String },
    /// Transfer is a base message to move a token to another account.
    /// Extends the token's expiry before delegating to the cw721 base
    TransferNft { recipient: String, token_id: String },
    /// Send is a base message to transfer a token to a contract and trigger
    /// an action on the receiving contract. Extends expiry like TransferNft
    SendNft {
        contract: String,
        token_id: String,
        msg: Binary,
    },
    /// Allows operator to transfer / send the token from the owner's account
    Approve {
        spender: String,
        token_id: String,
        expires: Option<Expiration>,
    },
    /// Remove previously granted Approval
    Revoke { spender: String, token_id: String },
    /// Allows operator to transfer / send any token from the owner's account
    ApproveAll {
        operator: String,
        expires: Option<Expiration>,
    },
    /// Remove previously granted ApproveAll permission
    RevokeAll { operator: String },
    /// Burn a token. Routed through the release path so the name record
    /// can never be orphaned
    Burn { token_id: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Token id bound to a name, 0 if unregistered
    #[returns(NameResponse)]
    Name { name: String },
    /// Absolute expiry of a token's registration
    #[returns(ExpiryResponse)]
    RegistrationExpiry { token_id: TokenId },
    /// The registrar role identifier constant
    #[returns(RegistrarRoleResponse)]
    RegistrarRole {},
    /// Role membership check
    #[returns(HasRoleResponse)]
    HasRole { role: String, address: String },
    #[returns(ParamsResponse)]
    Params {},
    #[returns(cw_controllers::AdminResponse)]
    Admin {},
    // cw721 passthrough
    #[returns(cw721::OwnerOfResponse)]
    OwnerOf {
        token_id: String,
        include_expired: Option<bool>,
    },
    #[returns(cw721::NumTokensResponse)]
    NumTokens {},
    #[returns(cw721::OperatorsResponse)]
    AllOperators {
        owner: String,
        include_expired: Option<bool>,
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct NameResponse {
    pub token_id: TokenId,
}

#[cw_serde]
pub struct ExpiryResponse {
    pub expiry: Timestamp,
}

#[cw_serde]
pub struct RegistrarRoleResponse {
    pub role: String,
}

#[cw_serde]
pub struct HasRoleResponse {
    pub has_role: bool,
}

#[cw_serde]
pub struct ParamsResponse {
    pub registration_price: Uint128,
    pub registration_duration: u64,
    pub transfer_extension: u64,
}
