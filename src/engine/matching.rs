//! Address matching for account-scoped transaction search.

use alloy::primitives::Address;

use crate::models::Transaction;

/// A caller supplied address, normalized for case-insensitive comparison.
///
/// The query is not validated. Input that is not a `0x`-prefixed, 20-byte hex
/// string never equals a rendered address and therefore matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressQuery(String);

impl AddressQuery {
    /// Creates a query from raw user input.
    pub fn new(address: &str) -> Self {
        Self(address.to_ascii_lowercase())
    }

    /// The normalized query string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the transaction was sent from, or addressed to, the
    /// queried account.
    ///
    /// Both sides are compared for exact equality after lower-casing. A
    /// contract creation has no recipient and can only match on its sender.
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.is(&tx.from()) || tx.to().is_some_and(|to| self.is(&to))
    }

    fn is(&self, address: &Address) -> bool {
        format!("{address:#x}") == self.0
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;
    use crate::test_helpers::TransactionBuilder;

    const SENDER: Address = address!("00000000000000000000000000000000000abcde");
    const RECIPIENT: Address = address!("0000000000000000000000000000000000012345");
    const OTHER: Address = address!("9999999999999999999999999999999999999999");

    #[test]
    fn test_matches_sender() {
        let tx = TransactionBuilder::new().from(SENDER).to(Some(OTHER)).build();
        assert!(AddressQuery::new("0x00000000000000000000000000000000000abcde").matches(&tx));
    }

    #[test]
    fn test_matches_recipient() {
        let tx = TransactionBuilder::new().from(OTHER).to(Some(RECIPIENT)).build();
        assert!(AddressQuery::new("0x0000000000000000000000000000000000012345").matches(&tx));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let tx = TransactionBuilder::new().from(SENDER).to(Some(OTHER)).build();
        assert!(AddressQuery::new("0x00000000000000000000000000000000000ABCDE").matches(&tx));
        assert!(AddressQuery::new("0X00000000000000000000000000000000000AbCdE").matches(&tx));
    }

    #[test]
    fn test_partial_address_does_not_match() {
        let tx = TransactionBuilder::new().from(SENDER).to(Some(RECIPIENT)).build();

        // Substrings of both the sender and the recipient.
        assert!(!AddressQuery::new("0x00000000000000000000000000000000000abcd").matches(&tx));
        assert!(!AddressQuery::new("abcde").matches(&tx));
        assert!(!AddressQuery::new("12345").matches(&tx));
        assert!(!AddressQuery::new("0x").matches(&tx));
        assert!(!AddressQuery::new("").matches(&tx));
    }

    #[test]
    fn test_contract_creation_only_matches_sender() {
        let tx = TransactionBuilder::new().from(SENDER).to(None).build();

        assert!(AddressQuery::new("0x00000000000000000000000000000000000abcde").matches(&tx));
        assert!(!AddressQuery::new("0x0000000000000000000000000000000000000000").matches(&tx));
        assert!(!AddressQuery::new("0x9999999999999999999999999999999999999999").matches(&tx));
    }

    #[test]
    fn test_unrelated_address_does_not_match() {
        let tx = TransactionBuilder::new().from(SENDER).to(Some(RECIPIENT)).build();
        assert!(!AddressQuery::new("0x9999999999999999999999999999999999999999").matches(&tx));
    }

    #[test]
    fn test_malformed_query_matches_nothing() {
        let tx = TransactionBuilder::new().from(SENDER).to(Some(RECIPIENT)).build();
        assert!(!AddressQuery::new("not an address").matches(&tx));
        assert!(!AddressQuery::new(" 0x00000000000000000000000000000000000abcde").matches(&tx));
    }
}
