use soroban_sdk::{contracttype, Address, Env, Map, String};

use crate::address::PointerAddress;
use crate::PointerKind;

pub const DAY_IN_LEDGERS: u32 = 17280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const POINTER_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const POINTER_LIFETIME_THRESHOLD: u32 = POINTER_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    Governance,
    /// Every live version of one key, ordered by version.
    Pointers(PointerKind, String),
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    extend_instance(env);
}

pub fn get_governance(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Governance)
}

pub fn set_governance(env: &Env, governance: &Address) {
    env.storage().instance().set(&DataKey::Governance, governance);
    extend_instance(env);
}

pub fn get_pointers(
    env: &Env,
    kind: PointerKind,
    key: &String,
) -> Option<Map<u32, PointerAddress>> {
    env.storage()
        .persistent()
        .get(&DataKey::Pointers(kind, key.clone()))
}

pub fn set_pointers(
    env: &Env,
    kind: PointerKind,
    key: &String,
    entries: &Map<u32, PointerAddress>,
) {
    env.storage()
        .persistent()
        .set(&DataKey::Pointers(kind, key.clone()), entries);
    extend_pointers(env, kind, key);
}

pub fn extend_pointers(env: &Env, kind: PointerKind, key: &String) {
    env.storage().persistent().extend_ttl(
        &DataKey::Pointers(kind, key.clone()),
        POINTER_LIFETIME_THRESHOLD,
        POINTER_BUMP_AMOUNT,
    );
}

pub fn remove_pointers(env: &Env, kind: PointerKind, key: &String) {
    env.storage()
        .persistent()
        .remove(&DataKey::Pointers(kind, key.clone()));
}
