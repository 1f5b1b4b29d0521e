use klr_types::{AccountId, Currency, LedgerKey, PublicKey};

use crate::keylet::Keylet;

/// Validated inputs for one key derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyletRequest {
    Account(AccountId),
    /// Page of an owner directory, located through the owner's root.
    OwnerDirPage { owner: AccountId, sub_index: u64 },
    /// Page of an arbitrary directory, located through its root key.
    DirPage { root: LedgerKey, sub_index: u64 },
    Escrow { owner: AccountId, seq: u32 },
    Offer { account: AccountId, seq: u32 },
    DepositPreauth { owner: AccountId, authorized: AccountId },
    TrustLine { accounts: [AccountId; 2], currency: Currency },
    Ticket { account: AccountId, ticket_seq: u32 },
    Hook(AccountId),
    HookDefinition(LedgerKey),
    HookState { account: AccountId, key: LedgerKey, namespace: LedgerKey },
    EmittedTxn(LedgerKey),
    UriToken { issuer: AccountId, uri: Vec<u8> },
    ImportVlSeq(PublicKey),
}

/// Capability that turns validated identifiers into ledger keys.
///
/// Implementations must be pure: the same request always yields the same
/// keylet.
pub trait KeyDeriver: Send + Sync {
    fn derive(&self, request: &KeyletRequest) -> Keylet;
}

/// Derivation with the ledger's standard namespaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardKeyDeriver;

impl KeyDeriver for StandardKeyDeriver {
    fn derive(&self, request: &KeyletRequest) -> Keylet {
        match request {
            KeyletRequest::Account(id) => Keylet::account(id),
            KeyletRequest::OwnerDirPage { owner, sub_index } => {
                Keylet::page(&Keylet::owner_dir(owner).key, *sub_index)
            }
            KeyletRequest::DirPage { root, sub_index } => Keylet::page(root, *sub_index),
            KeyletRequest::Escrow { owner, seq } => Keylet::escrow(owner, *seq),
            KeyletRequest::Offer { account, seq } => Keylet::offer(account, *seq),
            KeyletRequest::DepositPreauth { owner, authorized } => {
                Keylet::deposit_preauth(owner, authorized)
            }
            KeyletRequest::TrustLine { accounts, currency } => {
                Keylet::line(&accounts[0], &accounts[1], currency)
            }
            KeyletRequest::Ticket { account, ticket_seq } => Keylet::ticket(account, *ticket_seq),
            KeyletRequest::Hook(account) => Keylet::hook(account),
            KeyletRequest::HookDefinition(hash) => Keylet::hook_definition(hash),
            KeyletRequest::HookState {
                account,
                key,
                namespace,
            } => Keylet::hook_state(account, key, namespace),
            KeyletRequest::EmittedTxn(id) => Keylet::emitted_txn(id),
            KeyletRequest::UriToken { issuer, uri } => Keylet::uri_token(issuer, uri),
            KeyletRequest::ImportVlSeq(pk) => Keylet::import_vlseq(pk),
        }
    }
}
