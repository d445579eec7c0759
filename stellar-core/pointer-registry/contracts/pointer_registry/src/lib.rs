#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, Address, BytesN, Env, String, Vec,
};

mod address;
mod events;
mod registry;
mod storage;


pub use address::PointerAddress;
use registry::{
    Cw20Namespace, Cw721Namespace, Namespace, NativeNamespace, PointerChange,
    VersionedPointerStore,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum PointerKind {
    Native,
    Cw20,
    Cw721,
}

/// Governance proposal registering (or retracting) a pointer for a native
/// token denomination. An empty `pointer` retracts `version`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct AddNativePointerProposal {
    pub token: String,
    pub version: u32,
    pub pointer: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct AddCw20PointerProposal {
    pub pointee: String,
    pub version: u32,
    pub pointer: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct AddCw721PointerProposal {
    pub pointee: String,
    pub version: u32,
    pub pointer: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ResolvedPointer {
    pub pointer: BytesN<20>,
    pub version: u32,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotAuthorized = 1,
    NotInitialized = 2,
    AlreadyInitialized = 3,
    MalformedAddress = 4,
    VersionOutOfRange = 5,
    EmptyKey = 6,
}

#[contract]
pub struct PointerRegistry;

#[contractimpl]
impl PointerRegistry {
    /// Initialize the contract
    pub fn initialize(
        env: Env,
        admin: Address,
        governance: Address,
    ) -> Result<(), ContractError> {
        if storage::has_admin(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        storage::set_admin(&env, &admin);
        storage::set_governance(&env, &governance);

        events::emit_initialized(&env, &admin, &governance);
        Ok(())
    }

    // ========================================================================
    // Proposals
    // ========================================================================

    pub fn add_native_pointer(
        env: Env,
        caller: Address,
        proposal: AddNativePointerProposal,
    ) -> Result<(), ContractError> {
        Self::apply_proposal::<NativeNamespace>(
            &env,
            &caller,
            &proposal.token,
            proposal.version,
            &proposal.pointer,
        )
    }

    pub fn add_cw20_pointer(
        env: Env,
        caller: Address,
        proposal: AddCw20PointerProposal,
    ) -> Result<(), ContractError> {
        Self::apply_proposal::<Cw20Namespace>(
            &env,
            &caller,
            &proposal.pointee,
            proposal.version,
            &proposal.pointer,
        )
    }

    pub fn add_cw721_pointer(
        env: Env,
        caller: Address,
        proposal: AddCw721PointerProposal,
    ) -> Result<(), ContractError> {
        Self::apply_proposal::<Cw721Namespace>(
            &env,
            &caller,
            &proposal.pointee,
            proposal.version,
            &proposal.pointer,
        )
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Current pointer for a native denomination: the highest live version
    pub fn get_native_pointer(env: Env, token: String) -> Option<ResolvedPointer> {
        VersionedPointerStore::<NativeNamespace>::new(&env).resolve(&token)
    }

    pub fn get_cw20_pointer(env: Env, pointee: String) -> Option<ResolvedPointer> {
        VersionedPointerStore::<Cw20Namespace>::new(&env).resolve(&pointee)
    }

    pub fn get_cw721_pointer(env: Env, pointee: String) -> Option<ResolvedPointer> {
        VersionedPointerStore::<Cw721Namespace>::new(&env).resolve(&pointee)
    }

    /// All live versions for a key, ascending
    pub fn pointer_versions(env: Env, kind: PointerKind, key: String) -> Vec<u32> {
        match kind {
            PointerKind::Native => {
                VersionedPointerStore::<NativeNamespace>::new(&env).versions(&key)
            }
            PointerKind::Cw20 => VersionedPointerStore::<Cw20Namespace>::new(&env).versions(&key),
            PointerKind::Cw721 => {
                VersionedPointerStore::<Cw721Namespace>::new(&env).versions(&key)
            }
        }
    }

    // ========================================================================
    // Admin Functions
    // ========================================================================

    /// Update admin address
    pub fn update_admin(
        env: Env,
        caller: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;

        storage::set_admin(&env, &new_admin);
        events::emit_admin_changed(&env, &new_admin);
        Ok(())
    }

    /// Update governance address
    pub fn update_governance(
        env: Env,
        caller: Address,
        new_governance: Address,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;

        storage::set_governance(&env, &new_governance);
        events::emit_governance_changed(&env, &new_governance);
        Ok(())
    }

    pub fn get_admin(env: Env) -> Option<Address> {
        storage::get_admin(&env)
    }

    pub fn get_governance(env: Env) -> Option<Address> {
        storage::get_governance(&env)
    }
}

impl PointerRegistry {
    fn apply_proposal<N: Namespace>(
        env: &Env,
        caller: &Address,
        key: &String,
        version: u32,
        pointer: &String,
    ) -> Result<(), ContractError> {
        Self::require_governance(env, caller)?;

        match VersionedPointerStore::<N>::new(env).apply(key, version, pointer)? {
            PointerChange::Set(address) => {
                events::emit_pointer_set(env, N::TOPIC, key, version, &address)
            }
            PointerChange::Retracted => {
                events::emit_pointer_retracted(env, N::TOPIC, key, version)
            }
            PointerChange::Unchanged => {}
        }
        storage::extend_instance(env);

        Ok(())
    }

    fn require_governance(env: &Env, caller: &Address) -> Result<(), ContractError> {
        caller.require_auth();

        let governance = storage::get_governance(env).ok_or(ContractError::NotInitialized)?;
        if *caller != governance {
            return Err(ContractError::NotAuthorized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        caller.require_auth();

        let admin = storage::get_admin(env).ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::NotAuthorized);
        }
        Ok(())
    }
}
