use redb::TableDefinition;

/// Guests table: normalized name -> Guest (serialized)
pub const GUESTS: TableDefinition<&str, &[u8]> = TableDefinition::new("guests");

/// RSVPs table: sequence id -> RsvpRecord (serialized), append-only
pub const RSVPS: TableDefinition<u64, &[u8]> = TableDefinition::new("rsvps");

/// Gifts table: normalized guest name -> GiftSelection (serialized)
pub const GIFTS: TableDefinition<&str, &[u8]> = TableDefinition::new("gifts");

/// Payment proofs table: sequence id -> PaymentProof (serialized), append-only
pub const PAYMENT_PROOFS: TableDefinition<u64, &[u8]> = TableDefinition::new("payment_proofs");

/// Guestbook table: sequence id -> GuestbookMessage (serialized), append-only
pub const MESSAGES: TableDefinition<u64, &[u8]> = TableDefinition::new("messages");
