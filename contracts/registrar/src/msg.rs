use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

#[cw_serde]
pub struct InstantiateMsg {
    pub registry: String,
    /// Blocks that must elapse between a commit and its reveal
    pub min_commit_blocks: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Declare intent to register without disclosing the name. Overwrites
    /// any prior commitment for the address
    Commit { committer: String },
    /// Disclose the name and complete the registration, gated by the
    /// commitment's age. Payment is forwarded to the registry
    Reveal { name: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(CommittedResponse)]
    Committed { address: String },
    #[returns(CommitBlockResponse)]
    CommitBlock { address: String },
    #[returns(ConfigResponse)]
    Config {},
}

#[cw_serde]
pub struct CommittedResponse {
    pub committed: bool,
}

#[cw_serde]
pub struct CommitBlockResponse {
    /// 0 when the address has no commitment
    pub height: u64,
}

#[cw_serde]
pub struct ConfigResponse {
    pub registry: Addr,
    pub min_commit_blocks: u64,
}
