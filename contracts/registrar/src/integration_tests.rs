use anyhow::Result as AnyResult;
use cosmwasm_std::{coins, Addr, Empty, Uint128};
use cw_multi_test::{App, AppResponse, BankSudo, Contract, ContractWrapper, Executor, SudoMsg as CwSudoMsg};
use name_common::NATIVE_DENOM;
use name_registry::msg::{
    ExecuteMsg as RegistryExecuteMsg, InstantiateMsg as RegistryInstantiateMsg, NameRef,
    NameResponse, QueryMsg as RegistryQueryMsg, RegistrarRoleResponse,
};

use crate::msg::{
    CommitBlockResponse, CommittedResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, QueryMsg,
};

pub fn contract_registrar() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crate::contract::execute,
        crate::contract::instantiate,
        crate::query::query,
    );
    Box::new(contract)
}

pub fn contract_registry() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        name_registry::contract::execute,
        name_registry::contract::instantiate,
        name_registry::query::query,
    );
    Box::new(contract)
}

const ADMIN: &str = "admin";
const USER: &str = "user";
const OBSERVER: &str = "observer";
const NAME: &str = "TEST NAME";

const PRICE: u128 = 250_000;
// short expiration time for tests, production uses SECONDS_PER_QUARTER
const DURATION: u64 = 10;
const TRANSFER_EXTENSION: u64 = 60;
const MIN_BLOCKS: u64 = 2;

fn skip_blocks(app: &mut App, blocks: u64) {
    app.update_block(|block| {
        block.height += blocks;
        block.time = block.time.plus_seconds(5 * blocks);
    });
}

/// Deploy the registry and the registrar, then grant the registrar role to
/// the registrar contract, mirroring the deployment flow
fn setup() -> (App, Addr, Addr) {
    let mut app = App::default();
    let registry_id = app.store_code(contract_registry());
    let registrar_id = app.store_code(contract_registrar());

    let registry = app
        .instantiate_contract(
            registry_id,
            Addr::unchecked(ADMIN),
            &RegistryInstantiateMsg {
                registration_price: Uint128::new(PRICE),
                registration_duration: DURATION,
                transfer_extension: TRANSFER_EXTENSION,
                admin: None,
            },
            &[],
            "Registry",
            None,
        )
        .unwrap();

    let registrar = app
        .instantiate_contract(
            registrar_id,
            Addr::unchecked(ADMIN),
            &InstantiateMsg {
                registry: registry.to_string(),
                min_commit_blocks: MIN_BLOCKS,
            },
            &[],
            "Registrar",
            None,
        )
        .unwrap();

    let role: RegistrarRoleResponse = app
        .wrap()
        .query_wasm_smart(&registry, &RegistryQueryMsg::RegistrarRole {})
        .unwrap();
    app.execute_contract(
        Addr::unchecked(ADMIN),
        registry.clone(),
        &RegistryExecuteMsg::GrantRole {
            role: role.role,
            address: registrar.to_string(),
        },
        &[],
    )
    .unwrap();

    app.sudo(CwSudoMsg::Bank(BankSudo::Mint {
        to_address: USER.to_string(),
        amount: coins(10 * PRICE, NATIVE_DENOM),
    }))
    .unwrap();

    (app, registry, registrar)
}

fn commit(app: &mut App, registrar: &Addr, committer: &str) -> AnyResult<AppResponse> {
    app.execute_contract(
        Addr::unchecked(committer),
        registrar.clone(),
        &ExecuteMsg::Commit {
            committer: committer.to_string(),
        },
        &[],
    )
}

fn reveal(app: &mut App, registrar: &Addr, sender: &str, name: &str, payment: u128) -> AnyResult<AppResponse> {
    app.execute_contract(
        Addr::unchecked(sender),
        registrar.clone(),
        &ExecuteMsg::Reveal {
            name: name.to_string(),
        },
        &coins(payment, NATIVE_DENOM),
    )
}

fn committed(app: &App, registrar: &Addr, address: &str) -> bool {
    let res: CommittedResponse = app
        .wrap()
        .query_wasm_smart(
            registrar,
            &QueryMsg::Committed {
                address: address.to_string(),
            },
        )
        .unwrap();
    res.committed
}

fn commit_block(app: &App, registrar: &Addr, address: &str) -> u64 {
    let res: CommitBlockResponse = app
        .wrap()
        .query_wasm_smart(
            registrar,
            &QueryMsg::CommitBlock {
                address: address.to_string(),
            },
        )
        .unwrap();
    res.height
}

fn name_of(app: &App, registry: &Addr, name: &str) -> u64 {
    let res: NameResponse = app
        .wrap()
        .query_wasm_smart(
            registry,
            &RegistryQueryMsg::Name {
                name: name.to_string(),
            },
        )
        .unwrap();
    res.token_id
}

#[test]
fn config_is_set() {
    let (app, registry, registrar) = setup();

    let res: ConfigResponse = app
        .wrap()
        .query_wasm_smart(&registrar, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(res.registry, registry);
    assert_eq!(res.min_commit_blocks, MIN_BLOCKS);
}

#[test]
fn make_commit() {
    let (mut app, _, registrar) = setup();
    let height = app.block_info().height;

    commit(&mut app, &registrar, USER).unwrap();

    assert!(
        committed(&app, &registrar, USER),
        "commit was not set properly"
    );
    assert_eq!(
        commit_block(&app, &registrar, USER),
        height,
        "commit block was not set properly"
    );
}

#[test]
fn commit_always_succeeds_and_overwrites() {
    let (mut app, _, registrar) = setup();

    commit(&mut app, &registrar, USER).unwrap();
    let first = commit_block(&app, &registrar, USER);

    skip_blocks(&mut app, 5);
    commit(&mut app, &registrar, USER).unwrap();

    let second = commit_block(&app, &registrar, USER);
    assert_eq!(second, first + 5);

    // an observer can commit too, commitments are per address
    commit(&mut app, &registrar, OBSERVER).unwrap();
    assert!(committed(&app, &registrar, OBSERVER));
    assert!(committed(&app, &registrar, USER));
}

#[test]
fn reveal_new_name_and_mint() {
    let (mut app, registry, registrar) = setup();

    commit(&mut app, &registrar, USER).unwrap();
    skip_blocks(&mut app, MIN_BLOCKS);

    let res = reveal(&mut app, &registrar, USER, NAME, PRICE).unwrap();

    let minted = res
        .events
        .iter()
        .find(|e| e.ty == "wasm-mint-name")
        .expect("nft not minted properly");
    assert!(minted
        .attributes
        .iter()
        .any(|a| a.key == "owner" && a.value == USER));

    assert_ne!(name_of(&app, &registry, NAME), 0);

    // the fee is custodied by the registry, not the registrar
    let vault = app
        .wrap()
        .query_balance(&registry, NATIVE_DENOM)
        .unwrap()
        .amount;
    assert_eq!(vault, Uint128::new(PRICE));
    let gate = app
        .wrap()
        .query_balance(&registrar, NATIVE_DENOM)
        .unwrap()
        .amount;
    assert_eq!(gate, Uint128::zero());
}

#[test]
fn reveal_consumes_commitment() {
    let (mut app, _, registrar) = setup();

    commit(&mut app, &registrar, USER).unwrap();
    skip_blocks(&mut app, MIN_BLOCKS);
    reveal(&mut app, &registrar, USER, NAME, PRICE).unwrap();

    assert!(!committed(&app, &registrar, USER));
    assert_eq!(commit_block(&app, &registrar, USER), 0);

    // a second immediate reveal has nothing to consume
    let res = reveal(&mut app, &registrar, USER, "OTHER NAME", PRICE);
    assert_eq!(res.unwrap_err().root_cause().to_string(), "Uncommitted");
}

#[test]
fn reveal_before_min_blocks() {
    let (mut app, registry, registrar) = setup();

    commit(&mut app, &registrar, USER).unwrap();
    let height = commit_block(&app, &registrar, USER);

    let res = reveal(&mut app, &registrar, USER, NAME, PRICE);
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        "cannot commit and reveal in less than min blocks"
    );

    // rejected with no state change
    assert!(committed(&app, &registrar, USER));
    assert_eq!(commit_block(&app, &registrar, USER), height);
    assert_eq!(name_of(&app, &registry, NAME), 0);

    // one block short is still too recent
    skip_blocks(&mut app, MIN_BLOCKS - 1);
    let res = reveal(&mut app, &registrar, USER, NAME, PRICE);
    assert!(res.is_err());
    assert_eq!(name_of(&app, &registry, NAME), 0);
}

#[test]
fn reveal_if_not_committed() {
    let (mut app, registry, registrar) = setup();

    let res = reveal(&mut app, &registrar, USER, NAME, PRICE);
    assert_eq!(res.unwrap_err().root_cause().to_string(), "Uncommitted");
    assert_eq!(name_of(&app, &registry, NAME), 0);
}

#[test]
fn registry_failures_propagate() {
    let (mut app, registry, registrar) = setup();

    commit(&mut app, &registrar, USER).unwrap();
    skip_blocks(&mut app, MIN_BLOCKS);

    let res = reveal(&mut app, &registrar, USER, NAME, PRICE - 1);
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        format!("Insufficient payment, got: {}, expected {}", PRICE - 1, PRICE)
    );
    assert_eq!(name_of(&app, &registry, NAME), 0);

    // the failed forward aborted the whole call, commitment survives
    assert!(committed(&app, &registrar, USER));

    // corrected resubmission succeeds against the same commitment
    let res = reveal(&mut app, &registrar, USER, NAME, PRICE);
    assert!(res.is_ok());
}

#[test]
fn reveal_of_taken_name_fails() {
    let (mut app, registry, registrar) = setup();

    commit(&mut app, &registrar, USER).unwrap();
    skip_blocks(&mut app, MIN_BLOCKS);
    reveal(&mut app, &registrar, USER, NAME, PRICE).unwrap();

    app.sudo(CwSudoMsg::Bank(BankSudo::Mint {
        to_address: OBSERVER.to_string(),
        amount: coins(PRICE, NATIVE_DENOM),
    }))
    .unwrap();

    commit(&mut app, &registrar, OBSERVER).unwrap();
    skip_blocks(&mut app, MIN_BLOCKS);
    let res = reveal(&mut app, &registrar, OBSERVER, NAME, PRICE);
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        format!("Name is already registered: {NAME}")
    );
    assert_eq!(name_of(&app, &registry, NAME), 1);

    // the rejected reveal rolled back, so the commitment is still in place
    assert!(committed(&app, &registrar, OBSERVER));
}

#[test]
fn reveal_without_role_fails() {
    let (mut app, registry, registrar) = setup();

    let role: RegistrarRoleResponse = app
        .wrap()
        .query_wasm_smart(&registry, &RegistryQueryMsg::RegistrarRole {})
        .unwrap();
    app.execute_contract(
        Addr::unchecked(ADMIN),
        registry.clone(),
        &RegistryExecuteMsg::RevokeRole {
            role: role.role,
            address: registrar.to_string(),
        },
        &[],
    )
    .unwrap();

    commit(&mut app, &registrar, USER).unwrap();
    skip_blocks(&mut app, MIN_BLOCKS);

    let res = reveal(&mut app, &registrar, USER, NAME, PRICE);
    assert_eq!(
        res.unwrap_err().root_cause().to_string(),
        "Must have REGISTRAR role"
    );
}

#[test]
fn register_and_release_roundtrip() {
    let (mut app, registry, registrar) = setup();

    commit(&mut app, &registrar, USER).unwrap();
    skip_blocks(&mut app, MIN_BLOCKS);
    reveal(&mut app, &registrar, USER, NAME, PRICE).unwrap();

    let vault = app
        .wrap()
        .query_balance(&registry, NATIVE_DENOM)
        .unwrap()
        .amount;

    app.execute_contract(
        Addr::unchecked(USER),
        registry.clone(),
        &RegistryExecuteMsg::ReleaseName {
            handle: NameRef::Name(NAME.to_string()),
        },
        &[],
    )
    .unwrap();

    assert_eq!(name_of(&app, &registry, NAME), 0);
    let vault_after = app
        .wrap()
        .query_balance(&registry, NATIVE_DENOM)
        .unwrap()
        .amount;
    assert!(vault_after < vault);
    assert_eq!(vault - vault_after, Uint128::new(PRICE));
}
