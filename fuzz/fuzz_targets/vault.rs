#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::Address as _, token::StellarAssetClient, Address, Env,
};
use vault::withdrawal::WithdrawalState;
use vault::{VaultContract, VaultContractClient};

/// Actions modelling the vault's admin and withdrawal entry points.
///
/// Each variant carries the minimal data needed for execution. Values are
/// bounded to realistic ranges to avoid wasting fuzz cycles on trivially
/// rejected inputs.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Fund { amount: u32 },
    AddAdmin { user_index: u8 },
    RemoveAdmin { user_index: u8 },
    RequestWithdraw { amount: u32 },
    ApproveWithdraw,
    RejectWithdraw,
    Withdraw,
    SetMaxPercentage { percentage: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let deployer = Address::generate(&env);
    let native = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(VaultContract, ());
    let client = VaultContractClient::new(&env, &contract_id);
    if client.try_initialize(&deployer, &native.address()).is_err() {
        return;
    }

    let mut users = vec![deployer.clone()];
    for _ in 0..4 {
        users.push(Address::generate(&env));
    }
    // Bottomless funder so Fund actions can always succeed.
    let funder = Address::generate(&env);
    StellarAssetClient::new(&env, &native.address()).mint(&funder, &1_000_000_000_000i128);

    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Fund { amount } => {
                let _ = client.try_fund(&funder, &(amount as i128).max(1));
            }
            FuzzAction::AddAdmin { user_index } => {
                let target = &users[user_index as usize % users.len()];
                let _ = client.try_add_admin(caller, target);
            }
            FuzzAction::RemoveAdmin { user_index } => {
                let target = &users[user_index as usize % users.len()];
                let _ = client.try_remove_admin(caller, target);
            }
            FuzzAction::RequestWithdraw { amount } => {
                let _ = client.try_request_withdraw(caller, &(amount as i128).max(1));
            }
            FuzzAction::ApproveWithdraw => {
                let _ = client.try_approve_withdraw(caller);
            }
            FuzzAction::RejectWithdraw => {
                let _ = client.try_reject_withdraw(caller);
            }
            FuzzAction::Withdraw => {
                let _ = client.try_withdraw(caller);
            }
            FuzzAction::SetMaxPercentage { percentage } => {
                let _ = client.try_set_max_percentage(caller, &(percentage as u32));
            }
        }

        // ── Post-action invariant checks ──
        let admin_count = client.get_admin_count();
        assert!(admin_count >= 1, "INVARIANT VIOLATION: admin registry emptied");

        let percentage = client.get_percentage_to_withdraw();
        assert!(
            (1..=50).contains(&percentage),
            "INVARIANT VIOLATION: percentage {} out of range",
            percentage
        );

        let balance = client.get_native_balance();
        assert!(balance >= 0, "INVARIANT VIOLATION: treasury balance negative");

        // A live request must carry a sane per-admin split.
        match client.get_request_details() {
            WithdrawalState::Idle => {
                assert_eq!(client.get_max_withdraw(), 0);
            }
            WithdrawalState::Requested(req) => {
                assert!(req.amount_per_admin >= 0);
                assert_eq!(client.get_max_withdraw(), 0);
            }
            WithdrawalState::Approved(req) => {
                assert!(req.max_withdrawable >= 0);
                assert_eq!(client.get_max_withdraw(), req.max_withdrawable);
            }
        }
    }
});
