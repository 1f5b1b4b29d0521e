use klr_types::{AccountId, Currency, LedgerEntryType, LedgerKey, PublicKey};

use crate::hasher::KeyHasher;
use crate::namespace::LedgerNamespace;

/// A ledger key together with the type of object expected to live there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keylet {
    pub entry_type: LedgerEntryType,
    pub key: LedgerKey,
}

impl Keylet {
    pub const fn new(entry_type: LedgerEntryType, key: LedgerKey) -> Self {
        Self { entry_type, key }
    }

    pub fn account(id: &AccountId) -> Self {
        Self::new(
            LedgerEntryType::AccountRoot,
            KeyHasher::new(LedgerNamespace::Account).bytes(id.as_bytes()).finish(),
        )
    }

    /// Root page of an account's owner directory.
    pub fn owner_dir(id: &AccountId) -> Self {
        Self::new(
            LedgerEntryType::DirectoryNode,
            KeyHasher::new(LedgerNamespace::OwnerDir).bytes(id.as_bytes()).finish(),
        )
    }

    /// Page `index` of the directory rooted at `root`. Page 0 is the root.
    pub fn page(root: &LedgerKey, index: u64) -> Self {
        if index == 0 {
            return Self::new(LedgerEntryType::DirectoryNode, *root);
        }
        Self::new(
            LedgerEntryType::DirectoryNode,
            KeyHasher::new(LedgerNamespace::DirNode).bytes(root).u64(index).finish(),
        )
    }

    pub fn escrow(owner: &AccountId, seq: u32) -> Self {
        Self::new(
            LedgerEntryType::Escrow,
            KeyHasher::new(LedgerNamespace::Escrow).bytes(owner.as_bytes()).u32(seq).finish(),
        )
    }

    pub fn offer(account: &AccountId, seq: u32) -> Self {
        Self::new(
            LedgerEntryType::Offer,
            KeyHasher::new(LedgerNamespace::Offer).bytes(account.as_bytes()).u32(seq).finish(),
        )
    }

    pub fn deposit_preauth(owner: &AccountId, authorized: &AccountId) -> Self {
        Self::new(
            LedgerEntryType::DepositPreauth,
            KeyHasher::new(LedgerNamespace::DepositPreauth)
                .bytes(owner.as_bytes())
                .bytes(authorized.as_bytes())
                .finish(),
        )
    }

    /// Trust line between two accounts. Symmetric in its account arguments.
    pub fn line(a: &AccountId, b: &AccountId, currency: &Currency) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self::new(
            LedgerEntryType::RippleState,
            KeyHasher::new(LedgerNamespace::TrustLine)
                .bytes(low.as_bytes())
                .bytes(high.as_bytes())
                .bytes(currency.as_bytes())
                .finish(),
        )
    }

    pub fn ticket(account: &AccountId, ticket_seq: u32) -> Self {
        Self::new(
            LedgerEntryType::Ticket,
            KeyHasher::new(LedgerNamespace::Ticket)
                .bytes(account.as_bytes())
                .u32(ticket_seq)
                .finish(),
        )
    }

    pub fn hook(account: &AccountId) -> Self {
        Self::new(
            LedgerEntryType::Hook,
            KeyHasher::new(LedgerNamespace::Hook).bytes(account.as_bytes()).finish(),
        )
    }

    pub fn hook_definition(hook_hash: &LedgerKey) -> Self {
        Self::new(
            LedgerEntryType::HookDefinition,
            KeyHasher::new(LedgerNamespace::HookDefinition).bytes(hook_hash).finish(),
        )
    }

    pub fn hook_state(account: &AccountId, key: &LedgerKey, namespace: &LedgerKey) -> Self {
        Self::new(
            LedgerEntryType::HookState,
            KeyHasher::new(LedgerNamespace::HookState)
                .bytes(account.as_bytes())
                .bytes(key)
                .bytes(namespace)
                .finish(),
        )
    }

    pub fn emitted_txn(txn_id: &LedgerKey) -> Self {
        Self::new(
            LedgerEntryType::EmittedTxn,
            KeyHasher::new(LedgerNamespace::EmittedTxn).bytes(txn_id).finish(),
        )
    }

    pub fn uri_token(issuer: &AccountId, uri: &[u8]) -> Self {
        Self::new(
            LedgerEntryType::UriToken,
            KeyHasher::new(LedgerNamespace::UriToken)
                .bytes(issuer.as_bytes())
                .bytes(uri)
                .finish(),
        )
    }

    pub fn import_vlseq(validator: &PublicKey) -> Self {
        Self::new(
            LedgerEntryType::ImportVlSeq,
            KeyHasher::new(LedgerNamespace::ImportVlSeq)
                .bytes(validator.as_bytes())
                .finish(),
        )
    }
}
