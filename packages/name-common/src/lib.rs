use cosmwasm_std::{coins, BankMsg, Event, Response, Uint128};

pub const NATIVE_DENOM: &str = "untv";

/// 3 months, the production registration duration
pub const SECONDS_PER_QUARTER: u64 = 7_889_400;

/// Record custody of a registration fee in the response event stream.
/// The vault is the contract's own bank balance, so no message is needed.
pub fn charge_registration_fee(res: Response, amount: Uint128) -> Response {
    res.add_event(Event::new("fee-custody").add_attribute("amount", amount.to_string()))
}

/// Builder for the release-time vault withdrawal.
pub fn send_refund(to: impl Into<String>, amount: Uint128) -> BankMsg {
    BankMsg::Send {
        to_address: to.into(),
        amount: coins(amount.u128(), NATIVE_DENOM),
    }
}
