use core::marker::PhantomData;

use soroban_sdk::{log, symbol_short, Env, Map, String, Symbol, Vec};

use crate::address::{parse_address, PointerAddress};
use crate::{storage, ContractError, PointerKind, ResolvedPointer};

/// Storage partition a [`VersionedPointerStore`] operates on.
pub trait Namespace {
    const KIND: PointerKind;
    /// Event topic naming the namespace.
    const TOPIC: Symbol;
}

pub struct NativeNamespace;

impl Namespace for NativeNamespace {
    const KIND: PointerKind = PointerKind::Native;
    const TOPIC: Symbol = symbol_short!("native");
}

pub struct Cw20Namespace;

impl Namespace for Cw20Namespace {
    const KIND: PointerKind = PointerKind::Cw20;
    const TOPIC: Symbol = symbol_short!("cw20");
}

pub struct Cw721Namespace;

impl Namespace for Cw721Namespace {
    const KIND: PointerKind = PointerKind::Cw721;
    const TOPIC: Symbol = symbol_short!("cw721");
}

/// Outcome of applying one proposal to one (key, version) slot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PointerChange {
    Set(PointerAddress),
    Retracted,
    Unchanged,
}

/// Versioned key -> pointer mapping for a single namespace.
///
/// All versions of a key are kept. The current pointer is always the one
/// stored under the highest live version, recomputed on every read.
pub struct VersionedPointerStore<'a, N> {
    env: &'a Env,
    namespace: PhantomData<N>,
}

impl<'a, N: Namespace> VersionedPointerStore<'a, N> {
    pub fn new(env: &'a Env) -> Self {
        Self {
            env,
            namespace: PhantomData,
        }
    }

    pub fn resolve(&self, key: &String) -> Option<ResolvedPointer> {
        let entries = storage::get_pointers(self.env, N::KIND, key)?;
        let version = entries.keys().last()?;
        let pointer = entries.get(version)?;
        Some(ResolvedPointer { pointer, version })
    }

    /// Live versions of `key`, ascending.
    pub fn versions(&self, key: &String) -> Vec<u32> {
        storage::get_pointers(self.env, N::KIND, key)
            .map(|entries| entries.keys())
            .unwrap_or_else(|| Vec::new(self.env))
    }

    /// Upsert `pointer` at (`key`, `version`), or retract that version when
    /// `pointer` is empty. Input is fully validated before any write.
    pub fn apply(
        &self,
        key: &String,
        version: u32,
        pointer: &String,
    ) -> Result<PointerChange, ContractError> {
        if key.len() == 0 {
            return Err(ContractError::EmptyKey);
        }
        if version > u32::from(u16::MAX) {
            return Err(ContractError::VersionOutOfRange);
        }

        if pointer.len() == 0 {
            return Ok(self.retract(key, version));
        }

        let address = parse_address(self.env, pointer).map_err(|_| {
            log!(self.env, "malformed pointer address", key.clone(), version);
            ContractError::MalformedAddress
        })?;

        let mut entries = storage::get_pointers(self.env, N::KIND, key)
            .unwrap_or_else(|| Map::new(self.env));
        if entries.get(version).as_ref() == Some(&address) {
            storage::extend_pointers(self.env, N::KIND, key);
            return Ok(PointerChange::Unchanged);
        }

        entries.set(version, address.clone());
        storage::set_pointers(self.env, N::KIND, key, &entries);

        Ok(PointerChange::Set(address))
    }

    fn retract(&self, key: &String, version: u32) -> PointerChange {
        let Some(mut entries) = storage::get_pointers(self.env, N::KIND, key) else {
            return PointerChange::Unchanged;
        };
        if entries.remove(version).is_none() {
            return PointerChange::Unchanged;
        }

        // an emptied key must look exactly like one that never existed
        if entries.is_empty() {
            storage::remove_pointers(self.env, N::KIND, key);
        } else {
            storage::set_pointers(self.env, N::KIND, key, &entries);
        }

        PointerChange::Retracted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PointerRegistry;
    use soroban_sdk::Address;

    const POINTER_A: &str = "0x1111111111111111111111111111111111111111";
    const POINTER_B: &str = "0x2222222222222222222222222222222222222222";
    const POINTER_C: &str = "0x3333333333333333333333333333333333333333";

    fn setup() -> (Env, Address) {
        let env = Env::default();
        let contract_id = env.register(PointerRegistry, ());
        (env, contract_id)
    }

    fn text(env: &Env, value: &str) -> String {
        String::from_str(env, value)
    }

    fn address(env: &Env, value: &str) -> PointerAddress {
        parse_address(env, &text(env, value)).unwrap()
    }

    #[test]
    fn resolves_highest_version_regardless_of_write_order() {
        let (env, contract_id) = setup();
        env.as_contract(&contract_id, || {
            let store = VersionedPointerStore::<NativeNamespace>::new(&env);
            let key = text(&env, "usei");

            store.apply(&key, 7, &text(&env, POINTER_B)).unwrap();
            store.apply(&key, 3, &text(&env, POINTER_A)).unwrap();

            assert_eq!(
                store.resolve(&key),
                Some(ResolvedPointer {
                    pointer: address(&env, POINTER_B),
                    version: 7,
                })
            );
        });
    }

    #[test]
    fn retracting_a_historical_version_keeps_current() {
        let (env, contract_id) = setup();
        env.as_contract(&contract_id, || {
            let store = VersionedPointerStore::<Cw20Namespace>::new(&env);
            let key = text(&env, "pointee");

            store.apply(&key, 1, &text(&env, POINTER_A)).unwrap();
            store.apply(&key, 2, &text(&env, POINTER_B)).unwrap();
            store.apply(&key, 3, &text(&env, POINTER_C)).unwrap();

            let change = store.apply(&key, 2, &text(&env, "")).unwrap();
            assert_eq!(change, PointerChange::Retracted);

            let resolved = store.resolve(&key).unwrap();
            assert_eq!(resolved.version, 3);
            assert_eq!(resolved.pointer, address(&env, POINTER_C));
            assert_eq!(store.versions(&key), soroban_sdk::vec![&env, 1u32, 3u32]);
        });
    }

    #[test]
    fn retracting_every_version_clears_the_key() {
        let (env, contract_id) = setup();
        env.as_contract(&contract_id, || {
            let store = VersionedPointerStore::<Cw721Namespace>::new(&env);
            let key = text(&env, "nft");

            store.apply(&key, 4, &text(&env, POINTER_A)).unwrap();
            store.apply(&key, 4, &text(&env, "")).unwrap();

            assert_eq!(store.resolve(&key), None);
            assert!(store.versions(&key).is_empty());
            assert!(storage::get_pointers(&env, PointerKind::Cw721, &key).is_none());
        });
    }

    #[test]
    fn retracting_missing_version_is_a_no_op() {
        let (env, contract_id) = setup();
        env.as_contract(&contract_id, || {
            let store = VersionedPointerStore::<NativeNamespace>::new(&env);
            let key = text(&env, "usei");

            assert_eq!(
                store.apply(&key, 9, &text(&env, "")),
                Ok(PointerChange::Unchanged)
            );

            store.apply(&key, 1, &text(&env, POINTER_A)).unwrap();
            assert_eq!(
                store.apply(&key, 9, &text(&env, "")),
                Ok(PointerChange::Unchanged)
            );
            assert_eq!(store.resolve(&key).unwrap().version, 1);
        });
    }

    #[test]
    fn resubmitting_same_pointer_is_idempotent() {
        let (env, contract_id) = setup();
        env.as_contract(&contract_id, || {
            let store = VersionedPointerStore::<NativeNamespace>::new(&env);
            let key = text(&env, "usei");

            let first = store.apply(&key, 1, &text(&env, POINTER_A)).unwrap();
            let second = store.apply(&key, 1, &text(&env, POINTER_A)).unwrap();

            assert_eq!(first, PointerChange::Set(address(&env, POINTER_A)));
            assert_eq!(second, PointerChange::Unchanged);
            assert_eq!(store.versions(&key).len(), 1);
        });
    }

    #[test]
    fn overwrite_replaces_pointer_without_new_version() {
        let (env, contract_id) = setup();
        env.as_contract(&contract_id, || {
            let store = VersionedPointerStore::<NativeNamespace>::new(&env);
            let key = text(&env, "usei");

            store.apply(&key, 1, &text(&env, POINTER_A)).unwrap();
            store.apply(&key, 1, &text(&env, POINTER_B)).unwrap();

            let resolved = store.resolve(&key).unwrap();
            assert_eq!(resolved.version, 1);
            assert_eq!(resolved.pointer, address(&env, POINTER_B));
            assert_eq!(store.versions(&key).len(), 1);
        });
    }

    #[test]
    fn rejects_invalid_input_before_writing() {
        let (env, contract_id) = setup();
        env.as_contract(&contract_id, || {
            let store = VersionedPointerStore::<NativeNamespace>::new(&env);
            let key = text(&env, "x");

            assert_eq!(
                store.apply(&key, 5, &text(&env, "not-hex")),
                Err(ContractError::MalformedAddress)
            );
            assert_eq!(
                store.apply(&key, 65_536, &text(&env, POINTER_A)),
                Err(ContractError::VersionOutOfRange)
            );
            assert_eq!(
                store.apply(&text(&env, ""), 1, &text(&env, POINTER_A)),
                Err(ContractError::EmptyKey)
            );
            assert_eq!(store.resolve(&key), None);

            store.apply(&key, 65_535, &text(&env, POINTER_A)).unwrap();
            assert_eq!(store.resolve(&key).unwrap().version, 65_535);
        });
    }

    #[test]
    fn namespaces_do_not_share_keys() {
        let (env, contract_id) = setup();
        env.as_contract(&contract_id, || {
            let native = VersionedPointerStore::<NativeNamespace>::new(&env);
            let cw20 = VersionedPointerStore::<Cw20Namespace>::new(&env);
            let key = text(&env, "shared");

            native.apply(&key, 1, &text(&env, POINTER_A)).unwrap();

            assert!(native.resolve(&key).is_some());
            assert_eq!(cw20.resolve(&key), None);
        });
    }
}
