use crate::msg::{ExecuteMsg, ExpiryResponse, HasRoleResponse, NameResponse, QueryMsg};
use crate::state::TokenId;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_binary, Addr, Coin, CosmosMsg, QuerierWrapper, QueryRequest, StdResult, Timestamp, WasmMsg,
    WasmQuery,
};

/// RegistryContract is a wrapper around Addr that provides a lot of helpers
#[cw_serde]
pub struct RegistryContract(pub Addr);

impl RegistryContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call_with_funds<T: Into<ExecuteMsg>>(
        &self,
        msg: T,
        funds: Vec<Coin>,
    ) -> StdResult<CosmosMsg> {
        let msg = to_binary(&msg.into())?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds,
        }
        .into())
    }

    pub fn register_name(&self, name: &str, owner: &str, funds: Vec<Coin>) -> StdResult<CosmosMsg> {
        self.call_with_funds(
            ExecuteMsg::RegisterName {
                name: name.to_string(),
                owner: owner.to_string(),
            },
            funds,
        )
    }

    pub fn name(&self, querier: &QuerierWrapper, name: &str) -> StdResult<TokenId> {
        let res: NameResponse = querier.query(&QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: self.addr().into(),
            msg: to_binary(&QueryMsg::Name {
                name: name.to_string(),
            })?,
        }))?;

        Ok(res.token_id)
    }

    pub fn registration_expiry(
        &self,
        querier: &QuerierWrapper,
        token_id: TokenId,
    ) -> StdResult<Timestamp> {
        let res: ExpiryResponse = querier.query(&QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: self.addr().into(),
            msg: to_binary(&QueryMsg::RegistrationExpiry { token_id })?,
        }))?;

        Ok(res.expiry)
    }

    pub fn has_role(&self, querier: &QuerierWrapper, role: &str, address: &str) -> StdResult<bool> {
        let res: HasRoleResponse = querier.query(&QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: self.addr().into(),
            msg: to_binary(&QueryMsg::HasRole {
                role: role.to_string(),
                address: address.to_string(),
            })?,
        }))?;

        Ok(res.has_role)
    }
}
