//! Database Models
//!
//! Serde structs matching the SurrealDB tables. Record links between tables
//! use [`surrealdb::RecordId`] (`table:key` format end to end).

pub mod bonus;
pub mod communication;
pub mod geo;
pub mod inventory;
pub mod invitation;
pub mod product;
pub mod sale;
pub mod user;

pub use bonus::{
    BonusNetwork, BonusNetworkCreate, BonusNetworkUpdate, BonusTier, BonusTierCreate,
    BonusTierUpdate, PlanUpsert, PromoterPlan,
};
pub use communication::{ChatMessage, MessageCreate, Task, TaskCreate};
pub use geo::{
    Network, NetworkCreate, NetworkUpdate, Region, RegionCreate, RegionUpdate, Store, StoreCreate,
    StoreUpdate,
};
pub use inventory::{Inventory, InventoryUpsert};
pub use invitation::{Invitation, InvitationAccept, InvitationCreate, RoleAssignment};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use sale::{Sale, SaleCreate};
pub use user::{User, UserInfo, UserRole};
