/// 16-bit prefixes that separate the key space of each object kind.
///
/// The value is the ASCII code of a single mnemonic character, hashed
/// big-endian ahead of the object's fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum LedgerNamespace {
    Account = b'a' as u16,
    DirNode = b'd' as u16,
    TrustLine = b'r' as u16,
    Offer = b'o' as u16,
    OwnerDir = b'O' as u16,
    Escrow = b'u' as u16,
    Ticket = b'T' as u16,
    DepositPreauth = b'p' as u16,
    Hook = b'H' as u16,
    HookState = b'v' as u16,
    HookDefinition = b'D' as u16,
    EmittedTxn = b'E' as u16,
    UriToken = b'U' as u16,
    ImportVlSeq = b'I' as u16,
}

impl LedgerNamespace {
    pub const fn value(self) -> u16 {
        self as u16
    }

    pub fn to_be_bytes(self) -> [u8; 2] {
        self.value().to_be_bytes()
    }
}
