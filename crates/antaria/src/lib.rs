//! # Antaria
//!
//! Client library for the Lacuna Expanse game API (JSON-RPC 2.0 over
//! HTTP).
//!
//! Build a [`Session`], then read your empire through the entity
//! wrappers. Fields come from the session's status cache whenever it
//! holds them; a remote call is made only on a miss.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use antaria::prelude::*;
//!
//! # async fn run() -> Result<(), AntariaError> {
//! let mut session = Antaria::builder()
//!     .server("https://us1.lacunaexpanse.com")
//!     .empire("Antaria", "secret")
//!     .api_key("my-api-key")
//!     .build()?;
//!
//! let empire = Empire::new();
//! println!("{}", empire.name(&mut session).await?);
//!
//! for body in empire.bodies(&mut session).await? {
//!     let rates = body.resource_rates(&mut session).await?;
//!     println!("{}: {} ore/h", body.name(&mut session).await?, rates.ore);
//! }
//!
//! session.logout().await?;
//! # Ok(())
//! # }
//! ```

mod body;
mod builder;
mod building;
mod empire;
mod error;
mod fields;
mod resources;

pub use body::{Body, BodyMethod};
pub use builder::{Antaria, SessionBuilder};
pub use building::{Building, BuildingMethod};
pub use empire::{Empire, EmpireMethod};
pub use error::AntariaError;
pub use resources::{Amounts, Resources, FOOD_TYPES, ORE_TYPES};

pub use antaria_protocol::{ApiError, SESSION_EXPIRED};
pub use antaria_session::{
    Credentials, EntityId, Fragment, ModuleCaller, ModuleHandle, ModuleMethod,
    NamedMethod, Session, SessionConfig, SessionError, SessionState,
    SharedSession, StatusCache,
};
pub use antaria_transport::HttpTransport;

/// Everything needed to log in and read an empire.
pub mod prelude {
    pub use crate::{
        Antaria, AntariaError, Body, Building, Credentials, Empire, EntityId,
        ModuleCaller, Resources, Session, SessionConfig, SessionError,
    };
}
