use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use steelerp_core::{Aggregate, AggregateId, AggregateRoot, DomainError};
use steelerp_events::{Event, MovementAction, MovementRecord};
use steelerp_measure::{DecimalFeet, Measurement, MetricLength, measure, to_metric};

use crate::status::StockStatus;

/// Inventory item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryItemId(pub AggregateId);

impl InventoryItemId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for InventoryItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: InventoryItem.
///
/// Quantities are lengths of stock (bar, tube, sheet...). The history is the
/// append-only movement log consumed by forecasting.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    id: InventoryItemId,
    name: String,
    quantity: Measurement,
    minimum: Measurement,
    reservations: BTreeMap<String, Measurement>,
    history: Vec<MovementRecord>,
    version: u64,
    created: bool,
}

impl InventoryItem {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: InventoryItemId) -> Self {
        Self {
            id,
            name: String::new(),
            quantity: Measurement::ZERO,
            minimum: Measurement::ZERO,
            reservations: BTreeMap::new(),
            history: Vec::new(),
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> InventoryItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// On-hand quantity, reservations included.
    pub fn quantity(&self) -> Measurement {
        self.quantity
    }

    pub fn minimum(&self) -> Measurement {
        self.minimum
    }

    pub fn reservations(&self) -> &BTreeMap<String, Measurement> {
        &self.reservations
    }

    pub fn reserved_total(&self) -> Measurement {
        let total: DecimalFeet = self
            .reservations
            .values()
            .map(|m| m.to_decimal_feet())
            .sum();
        Measurement::from_decimal_feet(total)
    }

    /// On-hand minus reserved, never below zero.
    pub fn available(&self) -> Measurement {
        Measurement::from_decimal_feet(
            self.quantity.to_decimal_feet() - self.reserved_total().to_decimal_feet(),
        )
    }

    pub fn metric_quantity(&self) -> MetricLength {
        to_metric(self.quantity.to_decimal_feet())
    }

    pub fn status(&self) -> StockStatus {
        StockStatus::classify(
            self.quantity.to_decimal_feet(),
            self.reserved_total().to_decimal_feet(),
            self.minimum.to_decimal_feet(),
        )
    }

    pub fn history(&self) -> &[MovementRecord] {
        &self.history
    }
}

impl AggregateRoot for InventoryItem {
    type Id = InventoryItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateItem. Quantities are raw user text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItem {
    pub item_id: InventoryItemId,
    pub name: String,
    pub initial_quantity: String,
    pub minimum: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddStock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStock {
    pub item_id: InventoryItemId,
    pub quantity: String,
    pub note: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveStock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveStock {
    pub item_id: InventoryItemId,
    pub quantity: String,
    pub note: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AdjustStock (set the on-hand quantity after a count).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustStock {
    pub item_id: InventoryItemId,
    pub new_quantity: String,
    pub note: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReserveStock (create or replace a project's reservation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveStock {
    pub item_id: InventoryItemId,
    pub project: String,
    pub quantity: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReleaseReservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseReservation {
    pub item_id: InventoryItemId,
    pub project: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetMinimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMinimum {
    pub item_id: InventoryItemId,
    pub minimum: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    CreateItem(CreateItem),
    AddStock(AddStock),
    RemoveStock(RemoveStock),
    AdjustStock(AdjustStock),
    ReserveStock(ReserveStock),
    ReleaseReservation(ReleaseReservation),
    SetMinimum(SetMinimum),
}

/// Event: ItemCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCreated {
    pub item_id: InventoryItemId,
    pub name: String,
    pub quantity: Measurement,
    pub minimum: Measurement,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdded {
    pub item_id: InventoryItemId,
    pub quantity: Measurement,
    pub note: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRemoved {
    pub item_id: InventoryItemId,
    pub quantity: Measurement,
    pub note: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockAdjusted. `quantity` is the new on-hand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjusted {
    pub item_id: InventoryItemId,
    pub quantity: Measurement,
    pub note: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockReserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReserved {
    pub item_id: InventoryItemId,
    pub project: String,
    pub quantity: Measurement,
    /// An existing reservation for the same project was replaced.
    pub replaced: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ReservationReleased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationReleased {
    pub item_id: InventoryItemId,
    pub project: String,
    pub quantity: Measurement,
    pub occurred_at: DateTime<Utc>,
}

/// Event: MinimumChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumChanged {
    pub item_id: InventoryItemId,
    pub minimum: Measurement,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemCreated(ItemCreated),
    StockAdded(StockAdded),
    StockRemoved(StockRemoved),
    StockAdjusted(StockAdjusted),
    StockReserved(StockReserved),
    ReservationReleased(ReservationReleased),
    MinimumChanged(MinimumChanged),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemCreated(_) => "inventory.item.created",
            InventoryEvent::StockAdded(_) => "inventory.stock.added",
            InventoryEvent::StockRemoved(_) => "inventory.stock.removed",
            InventoryEvent::StockAdjusted(_) => "inventory.stock.adjusted",
            InventoryEvent::StockReserved(_) => "inventory.reservation.placed",
            InventoryEvent::ReservationReleased(_) => "inventory.reservation.released",
            InventoryEvent::MinimumChanged(_) => "inventory.item.minimum_changed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemCreated(e) => e.occurred_at,
            InventoryEvent::StockAdded(e) => e.occurred_at,
            InventoryEvent::StockRemoved(e) => e.occurred_at,
            InventoryEvent::StockAdjusted(e) => e.occurred_at,
            InventoryEvent::StockReserved(e) => e.occurred_at,
            InventoryEvent::ReservationReleased(e) => e.occurred_at,
            InventoryEvent::MinimumChanged(e) => e.occurred_at,
        }
    }
}

impl Aggregate for InventoryItem {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::ItemCreated(e) => {
                self.id = e.item_id;
                self.name = e.name.clone();
                self.quantity = e.quantity;
                self.minimum = e.minimum;
                self.created = true;
                self.record(e.occurred_at, MovementAction::Create, e.quantity, "item created");
            }
            InventoryEvent::StockAdded(e) => {
                self.quantity = Measurement::from_decimal_feet(
                    self.quantity.to_decimal_feet() + e.quantity.to_decimal_feet(),
                );
                self.record(e.occurred_at, MovementAction::Add, e.quantity, &e.note);
            }
            InventoryEvent::StockRemoved(e) => {
                self.quantity = Measurement::from_decimal_feet(
                    self.quantity.to_decimal_feet() - e.quantity.to_decimal_feet(),
                );
                self.record(e.occurred_at, MovementAction::Remove, e.quantity, &e.note);
            }
            InventoryEvent::StockAdjusted(e) => {
                self.quantity = e.quantity;
                self.record(e.occurred_at, MovementAction::Adjust, e.quantity, &e.note);
            }
            InventoryEvent::StockReserved(e) => {
                self.reservations.insert(e.project.clone(), e.quantity);
                let action = if e.replaced {
                    MovementAction::ReserveModify
                } else {
                    MovementAction::ReserveNew
                };
                let note = format!("project: {}", e.project);
                self.record(e.occurred_at, action, e.quantity, &note);
            }
            InventoryEvent::ReservationReleased(e) => {
                self.reservations.remove(&e.project);
                let note = format!("project: {}", e.project);
                self.record(e.occurred_at, MovementAction::ReserveDelete, e.quantity, &note);
            }
            InventoryEvent::MinimumChanged(e) => {
                self.minimum = e.minimum;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::CreateItem(cmd) => self.handle_create(cmd),
            InventoryCommand::AddStock(cmd) => self.handle_add(cmd),
            InventoryCommand::RemoveStock(cmd) => self.handle_remove(cmd),
            InventoryCommand::AdjustStock(cmd) => self.handle_adjust(cmd),
            InventoryCommand::ReserveStock(cmd) => self.handle_reserve(cmd),
            InventoryCommand::ReleaseReservation(cmd) => self.handle_release(cmd),
            InventoryCommand::SetMinimum(cmd) => self.handle_set_minimum(cmd),
        }
    }
}

/// Canonicalize user text, surfacing parse failures as validation errors.
fn canonical(field: &str, raw: &str) -> Result<Measurement, DomainError> {
    measure(raw).map_err(|e| DomainError::validation(format!("{field}: {e}")))
}

fn positive(field: &str, raw: &str) -> Result<Measurement, DomainError> {
    let m = canonical(field, raw)?;
    if m.is_zero() {
        return Err(DomainError::validation(format!("{field} must be positive")));
    }
    Ok(m)
}

fn note_or(note: &str, default: &str) -> String {
    let note = note.trim();
    if note.is_empty() {
        default.to_string()
    } else {
        note.to_string()
    }
}

impl InventoryItem {
    fn record(
        &mut self,
        occurred_at: DateTime<Utc>,
        action: MovementAction,
        quantity: Measurement,
        note: &str,
    ) {
        self.history.push(MovementRecord::at(
            occurred_at.naive_utc(),
            action,
            quantity.to_string(),
            note,
        ));
    }

    fn ensure_exists(&self, item_id: InventoryItemId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        if self.id != item_id {
            return Err(DomainError::invariant("item_id mismatch"));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateItem) -> Result<Vec<InventoryEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("item already exists"));
        }
        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(vec![InventoryEvent::ItemCreated(ItemCreated {
            item_id: cmd.item_id,
            name: cmd.name.trim().to_string(),
            quantity: canonical("initial quantity", &cmd.initial_quantity)?,
            minimum: canonical("minimum", &cmd.minimum)?,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add(&self, cmd: &AddStock) -> Result<Vec<InventoryEvent>, DomainError> {
        self.ensure_exists(cmd.item_id)?;
        let quantity = positive("quantity to add", &cmd.quantity)?;

        Ok(vec![InventoryEvent::StockAdded(StockAdded {
            item_id: cmd.item_id,
            quantity,
            note: note_or(&cmd.note, "manual addition"),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveStock) -> Result<Vec<InventoryEvent>, DomainError> {
        self.ensure_exists(cmd.item_id)?;
        let quantity = positive("quantity to remove", &cmd.quantity)?;

        if quantity > self.quantity {
            debug!(item = %self.id, requested = %quantity, on_hand = %self.quantity, "removal rejected");
            return Err(DomainError::invariant(format!(
                "cannot remove {quantity}: only {} in stock",
                self.quantity
            )));
        }

        Ok(vec![InventoryEvent::StockRemoved(StockRemoved {
            item_id: cmd.item_id,
            quantity,
            note: note_or(&cmd.note, "manual removal"),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_adjust(&self, cmd: &AdjustStock) -> Result<Vec<InventoryEvent>, DomainError> {
        self.ensure_exists(cmd.item_id)?;
        let quantity = canonical("new quantity", &cmd.new_quantity)?;

        if quantity == self.quantity {
            return Err(DomainError::validation("quantity unchanged"));
        }

        Ok(vec![InventoryEvent::StockAdjusted(StockAdjusted {
            item_id: cmd.item_id,
            quantity,
            note: note_or(&cmd.note, "inventory count"),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_reserve(&self, cmd: &ReserveStock) -> Result<Vec<InventoryEvent>, DomainError> {
        self.ensure_exists(cmd.item_id)?;
        let project = cmd.project.trim();
        if project.is_empty() {
            return Err(DomainError::validation("project cannot be empty"));
        }
        let quantity = positive("reserved quantity", &cmd.quantity)?;

        Ok(vec![InventoryEvent::StockReserved(StockReserved {
            item_id: cmd.item_id,
            project: project.to_string(),
            quantity,
            replaced: self.reservations.contains_key(project),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_release(&self, cmd: &ReleaseReservation) -> Result<Vec<InventoryEvent>, DomainError> {
        self.ensure_exists(cmd.item_id)?;
        let project = cmd.project.trim();
        let quantity = *self
            .reservations
            .get(project)
            .ok_or_else(DomainError::not_found)?;

        Ok(vec![InventoryEvent::ReservationReleased(ReservationReleased {
            item_id: cmd.item_id,
            project: project.to_string(),
            quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_minimum(&self, cmd: &SetMinimum) -> Result<Vec<InventoryEvent>, DomainError> {
        self.ensure_exists(cmd.item_id)?;
        Ok(vec![InventoryEvent::MinimumChanged(MinimumChanged {
            item_id: cmd.item_id,
            minimum: canonical("minimum", &cmd.minimum)?,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_item_id() -> InventoryItemId {
        InventoryItemId::new(AggregateId::new())
    }

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
    }

    fn created_item(quantity: &str, minimum: &str) -> InventoryItem {
        let item_id = test_item_id();
        let mut item = InventoryItem::empty(item_id);
        item.execute(&InventoryCommand::CreateItem(CreateItem {
            item_id,
            name: "Tube carré 2x2".to_string(),
            initial_quantity: quantity.to_string(),
            minimum: minimum.to_string(),
            occurred_at: test_time(),
        }))
        .unwrap();
        item
    }

    fn add(item: &InventoryItem, quantity: &str) -> InventoryCommand {
        InventoryCommand::AddStock(AddStock {
            item_id: item.id_typed(),
            quantity: quantity.to_string(),
            note: String::new(),
            occurred_at: test_time(),
        })
    }

    fn remove(item: &InventoryItem, quantity: &str) -> InventoryCommand {
        InventoryCommand::RemoveStock(RemoveStock {
            item_id: item.id_typed(),
            quantity: quantity.to_string(),
            note: "job 1042".to_string(),
            occurred_at: test_time(),
        })
    }

    fn reserve(item: &InventoryItem, project: &str, quantity: &str) -> InventoryCommand {
        InventoryCommand::ReserveStock(ReserveStock {
            item_id: item.id_typed(),
            project: project.to_string(),
            quantity: quantity.to_string(),
            occurred_at: test_time(),
        })
    }

    #[test]
    fn create_canonicalizes_quantities() {
        let item = created_item("3 6 1/2", "400000");
        assert_eq!(item.quantity().to_string(), "3' 6 1/2\"");
        assert_eq!(item.minimum().to_string(), "40' 0\"");
        assert_eq!(item.version(), 1);
        assert_eq!(item.history().len(), 1);
        assert_eq!(item.history()[0].action, MovementAction::Create);
        assert_eq!(item.history()[0].timestamp, "2025-03-14 09:30:00");
    }

    #[test]
    fn create_rejects_bad_input() {
        let item_id = test_item_id();
        let item = InventoryItem::empty(item_id);
        let err = item
            .handle(&InventoryCommand::CreateItem(CreateItem {
                item_id,
                name: "  ".to_string(),
                initial_quantity: "0".to_string(),
                minimum: "0".to_string(),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert_eq!(err, DomainError::validation("name cannot be empty"));

        let err = item
            .handle(&InventoryCommand::CreateItem(CreateItem {
                item_id,
                name: "Angle 1x1".to_string(),
                initial_quantity: "lots".to_string(),
                minimum: "0".to_string(),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("'lots'")));
    }

    #[test]
    fn create_twice_conflicts() {
        let item = created_item("10'", "0");
        let err = item
            .handle(&InventoryCommand::CreateItem(CreateItem {
                item_id: item.id_typed(),
                name: "again".to_string(),
                initial_quantity: "0".to_string(),
                minimum: "0".to_string(),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn add_and_remove_keep_canonical_totals() {
        let mut item = created_item("10'", "0");
        item.execute(&add(&item, "2 6 1/4")).unwrap();
        assert_eq!(item.quantity().to_string(), "12' 6 1/4\"");

        item.execute(&remove(&item, "6 3/4\"")).unwrap();
        assert_eq!(item.quantity().to_string(), "11' 11 1/2\"");

        let last = item.history().last().unwrap();
        assert_eq!(last.action, MovementAction::Remove);
        assert_eq!(last.quantity, "0' 6 3/4\"");
        assert_eq!(last.note, "job 1042");
        assert_eq!(item.history()[1].note, "manual addition");
        assert_eq!(item.version(), 3);
    }

    #[test]
    fn zero_quantities_are_rejected() {
        let item = created_item("10'", "0");
        let err = item.handle(&add(&item, "0' 0\"")).unwrap_err();
        assert_eq!(err, DomainError::validation("quantity to add must be positive"));
        assert!(item.handle(&remove(&item, "")).is_err());
    }

    #[test]
    fn cannot_remove_more_than_on_hand() {
        let item = created_item("5'", "0");
        let err = item.handle(&remove(&item, "5' 1/8\"")).unwrap_err();
        assert_eq!(
            err,
            DomainError::invariant("cannot remove 5' 0 1/8\": only 5' 0\" in stock")
        );
        assert!(item.handle(&remove(&item, "5'")).is_ok());
    }

    #[test]
    fn commands_on_missing_item_are_not_found() {
        let item = InventoryItem::empty(test_item_id());
        assert_eq!(item.handle(&add(&item, "1'")).unwrap_err(), DomainError::NotFound);
    }

    #[test]
    fn commands_for_other_item_are_rejected() {
        let item = created_item("5'", "0");
        let other = InventoryCommand::AddStock(AddStock {
            item_id: test_item_id(),
            quantity: "1'".to_string(),
            note: String::new(),
            occurred_at: test_time(),
        });
        assert!(matches!(
            item.handle(&other),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn reservations_reduce_available_and_drive_status() {
        let mut item = created_item("20'", "8'");
        assert_eq!(item.status(), StockStatus::Available);

        item.execute(&reserve(&item, "P-100", "6'")).unwrap();
        item.execute(&reserve(&item, "P-200", "2' 6")).unwrap();
        assert_eq!(item.reserved_total().to_string(), "8' 6\"");
        assert_eq!(item.available().to_string(), "11' 6\"");
        assert_eq!(item.status(), StockStatus::Low);

        // replacing a reservation is a modification
        item.execute(&reserve(&item, "P-100", "10'")).unwrap();
        assert_eq!(
            item.history().last().unwrap().action,
            MovementAction::ReserveModify
        );
        assert_eq!(item.status(), StockStatus::Critical);

        item.execute(&InventoryCommand::ReleaseReservation(ReleaseReservation {
            item_id: item.id_typed(),
            project: "P-100".to_string(),
            occurred_at: test_time(),
        }))
        .unwrap();
        let last = item.history().last().unwrap();
        assert_eq!(last.action, MovementAction::ReserveDelete);
        assert_eq!(last.quantity, "10' 0\"");
        assert_eq!(last.note, "project: P-100");
        assert_eq!(item.reserved_total().to_string(), "2' 6\"");
    }

    #[test]
    fn releasing_unknown_project_is_not_found() {
        let item = created_item("20'", "0");
        let err = item
            .handle(&InventoryCommand::ReleaseReservation(ReleaseReservation {
                item_id: item.id_typed(),
                project: "nope".to_string(),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn adjust_sets_absolute_quantity() {
        let mut item = created_item("20'", "0");
        item.execute(&InventoryCommand::AdjustStock(AdjustStock {
            item_id: item.id_typed(),
            new_quantity: "0".to_string(),
            note: String::new(),
            occurred_at: test_time(),
        }))
        .unwrap();
        assert!(item.quantity().is_zero());
        assert_eq!(item.status(), StockStatus::Depleted);
        assert_eq!(item.history().last().unwrap().action, MovementAction::Adjust);
        assert_eq!(item.metric_quantity().meters(), 0.0);
    }

    #[test]
    fn set_minimum_does_not_touch_history() {
        let mut item = created_item("20'", "0");
        item.execute(&InventoryCommand::SetMinimum(SetMinimum {
            item_id: item.id_typed(),
            minimum: "15ft".to_string(),
            occurred_at: test_time(),
        }))
        .unwrap();
        assert_eq!(item.minimum().to_string(), "15' 0\"");
        assert_eq!(item.history().len(), 1);
        // 20' on hand is within 1.5x of 15'
        assert_eq!(item.status(), StockStatus::Low);
    }

    #[test]
    fn events_are_named_and_serializable() {
        let item = created_item("20'", "0");
        let events = item.handle(&remove(&item, "1'")).unwrap();
        assert_eq!(events[0].event_type(), "inventory.stock.removed");
        assert_eq!(events[0].occurred_at(), test_time());

        let json = serde_json::to_value(&events[0]).unwrap();
        assert_eq!(json["StockRemoved"]["quantity"], "1' 0\"");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: adding then removing the same quantity restores the stock.
            #[test]
            fn add_then_remove_restores_quantity(feet in 0u64..500, inches in 0u8..12, eighths in 1u8..8) {
                let mut item = created_item("100' 0\"", "0");
                let qty = Measurement::new(feet, inches, eighths).unwrap().to_string();
                item.execute(&add(&item, &qty)).unwrap();
                item.execute(&remove(&item, &qty)).unwrap();
                prop_assert_eq!(item.quantity().to_string(), "100' 0\"");
            }

            /// Property: every history quantity is already canonical.
            #[test]
            fn history_quantities_are_canonical(amounts in prop::collection::vec(1u32..2_000, 1..10)) {
                let mut item = created_item("0", "0");
                for eighths in amounts {
                    let qty = format!("{}\"", f64::from(eighths) / 8.0);
                    item.execute(&add(&item, &qty)).unwrap();
                }
                for record in item.history() {
                    let again = steelerp_measure::validate_measurement(&record.quantity).unwrap();
                    prop_assert_eq!(&again, &record.quantity);
                }
            }
        }
    }
}
