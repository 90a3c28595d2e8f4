use cosmwasm_std::StdError;
use cw_controllers::AdminError;
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    Admin(#[from] AdminError),

    #[error("{0}")]
    Base(#[from] cw721_base::ContractError),

    #[error("Must have REGISTRAR role")]
    NotAuthorizedRole {},

    #[error("Insufficient payment, got: {got}, expected {expected}")]
    InsufficientPayment { got: u128, expected: u128 },

    #[error("Name is already registered: {name}")]
    NameAlreadyRegistered { name: String },

    #[error("NotOwnerOrOperator")]
    NotOwnerOrOperator {},

    #[error("NameNotFound")]
    NameNotFound {},

    #[error("Unknown role: {role}")]
    UnknownRole { role: String },

    #[error("InvalidDuration")]
    InvalidDuration {},
}
