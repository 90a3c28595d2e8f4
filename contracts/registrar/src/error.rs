use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Uncommitted")]
    Uncommitted {},

    #[error("cannot commit and reveal in less than min blocks")]
    CommitTooRecent {
        current: u64,
        committed: u64,
        min_blocks: u64,
    },
}
