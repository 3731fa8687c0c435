pub mod cart;
pub mod catalog;
pub mod finance;
pub mod order;
pub mod settings;
pub mod user;

pub use cart::{CartItem, CartTopping};
pub use catalog::{Category, DeliveryZone, Modifier, ModifierGroup, Product, GLOBAL_SIZE_CATEGORY};
pub use finance::{AccountPayable, CashRegisterSession, Expense, SessionStatus};
pub use order::{Order, OrderStatus, PaymentMethod, PaymentStatus};
pub use settings::{OpeningHours, Settings};
pub use user::{Permission, User, ADMIN_PERMISSIONS};
