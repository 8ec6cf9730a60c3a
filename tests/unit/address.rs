//! Tests for the data-source-instance ordering contract.
//!
//! `DataSourceInstance::source_id()` and `Address::header_quads()` are
//! `pub(crate)` wire-encoding details, not public data model, so their
//! tests stay with the source in `src/address.rs` instead of here.

use sflow_agent::address::{DataSourceInstance, DsClass};

#[test]
fn dsi_ordering_is_lexicographic() {
    let a = DataSourceInstance::new(DsClass::IfIndex, 1, 0);
    let b = DataSourceInstance::new(DsClass::IfIndex, 2, 0);
    let c = DataSourceInstance::new(DsClass::Vlan, 0, 0);
    assert!(a < b);
    assert!(b < c);
}
