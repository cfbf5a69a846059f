//! Inventory domain module (event-sourced).
//!
//! This crate contains business rules for inventory, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage). Quantities are
//! lengths; every one entering the aggregate is canonicalized by
//! `steelerp-measure` first.

pub mod item;
pub mod status;

pub use item::{
    AddStock, AdjustStock, CreateItem, InventoryCommand, InventoryEvent, InventoryItem,
    InventoryItemId, ItemCreated, MinimumChanged, ReleaseReservation, RemoveStock,
    ReservationReleased, ReserveStock, SetMinimum, StockAdded, StockAdjusted, StockRemoved,
    StockReserved,
};
pub use status::StockStatus;
