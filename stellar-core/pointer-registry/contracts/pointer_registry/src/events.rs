use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

use crate::address::PointerAddress;

pub const INITIALIZED: Symbol = symbol_short!("init");
pub const POINTER_SET: Symbol = symbol_short!("ptr_set");
pub const POINTER_RETRACTED: Symbol = symbol_short!("ptr_del");
pub const ADMIN_CHANGED: Symbol = symbol_short!("admin");
pub const GOVERNANCE_CHANGED: Symbol = symbol_short!("gov");

pub fn emit_initialized(env: &Env, admin: &Address, governance: &Address) {
    env.events()
        .publish((INITIALIZED,), (admin.clone(), governance.clone()));
}

pub fn emit_pointer_set(
    env: &Env,
    namespace: Symbol,
    key: &String,
    version: u32,
    pointer: &PointerAddress,
) {
    env.events().publish(
        (POINTER_SET, namespace),
        (key.clone(), version, pointer.clone()),
    );
}

pub fn emit_pointer_retracted(env: &Env, namespace: Symbol, key: &String, version: u32) {
    env.events()
        .publish((POINTER_RETRACTED, namespace), (key.clone(), version));
}

pub fn emit_admin_changed(env: &Env, admin: &Address) {
    env.events().publish((ADMIN_CHANGED,), admin.clone());
}

pub fn emit_governance_changed(env: &Env, governance: &Address) {
    env.events().publish((GOVERNANCE_CHANGED,), governance.clone());
}
