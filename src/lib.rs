//! Reading of OFX 1.x (SGML) bank statement files.
//!
//! An OFX file is a block of `NAME:value` header lines followed by SGML markup in which elements
//! holding a value may omit their end tag. [`Ofx`] splits the two apart, closes the open elements
//! and parses the markup into an [`Element`] tree, from which typed records of the sign-on,
//! statement envelope, account, transactions and balance sections can be extracted.
//!
//! ```no_run
//! use ofx_statement::Ofx;
//!
//! let ofx = Ofx::open("statement.ofx")?;
//! for movement in ofx.movements()?.movements {
//!     println!("{} {} {}", movement.dtposted, movement.trnamt, movement.fitid);
//! }
//! # Ok::<(), ofx_statement::Error>(())
//! ```

pub mod element;
mod error;
pub mod ofx;
mod options;
pub mod parse;

pub use element::{Cursor, Element};
pub use error::{Error, OfxParseWarning, Result, Warn};
pub use ofx::header::{HeaderProperties, OfxHeader};
pub use ofx::response::{
    AccountInfo, LedgerBalance, Movement, MovementsWindow, SignOnInfo, TransactionResponseHeader,
};
pub use ofx::Ofx;
pub use options::ParseOptions;
