//! Typed views of the sections of an OFX response.

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::element::Cursor;
use crate::error::Result;
use crate::parse::value::{parse_amount, DatePattern};

const SONRS: &[&str] = &["SIGNONMSGSRSV1", "SONRS"];
const STMTTRNRS: &[&str] = &["BANKMSGSRSV1", "STMTTRNRS"];
const STMTRS: &[&str] = &["BANKMSGSRSV1", "STMTTRNRS", "STMTRS"];
const BANKTRANLIST: &[&str] = &["BANKMSGSRSV1", "STMTTRNRS", "STMTRS", "BANKTRANLIST"];
const LEDGERBAL: &[&str] = &["BANKMSGSRSV1", "STMTTRNRS", "STMTRS", "LEDGERBAL"];

/// The sign-on response (`<SONRS>`).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SignOnInfo {
    pub status_code: String,
    pub status_severity: String,
    pub dtserver: Date,
    pub language: String,
    pub fi_org: String,
    pub fi_fid: String,
}

impl SignOnInfo {
    pub(crate) fn extract(root: &Cursor, dates: &DatePattern) -> Result<Self> {
        let sonrs = root.descend(SONRS)?;
        Ok(SignOnInfo {
            status_code: sonrs.text(&["STATUS", "CODE"])?.to_owned(),
            status_severity: sonrs.text(&["STATUS", "SEVERITY"])?.to_owned(),
            dtserver: dates.parse(sonrs.text(&["DTSERVER"])?)?,
            language: sonrs.text(&["LANGUAGE"])?.to_owned(),
            fi_org: sonrs.text(&["FI", "ORG"])?.to_owned(),
            fi_fid: sonrs.text(&["FI", "FID"])?.to_owned(),
        })
    }
}

/// The envelope of a bank statement response (`<STMTTRNRS>`).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TransactionResponseHeader {
    pub trnuid: String,
    pub status_code: String,
    pub status_severity: String,
}

impl TransactionResponseHeader {
    pub(crate) fn extract(root: &Cursor) -> Result<Self> {
        let stmttrnrs = root.descend(STMTTRNRS)?;
        Ok(TransactionResponseHeader {
            trnuid: stmttrnrs.text(&["TRNUID"])?.to_owned(),
            status_code: stmttrnrs.text(&["STATUS", "CODE"])?.to_owned(),
            status_severity: stmttrnrs.text(&["STATUS", "SEVERITY"])?.to_owned(),
        })
    }
}

/// The account a statement is for.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AccountInfo {
    pub currency: String,
    pub bank_id: String,
    pub branch_id: String,
    pub account_id: String,
    pub account_type: String,
}

impl AccountInfo {
    pub(crate) fn extract(root: &Cursor) -> Result<Self> {
        let stmtrs = root.descend(STMTRS)?;
        Ok(AccountInfo {
            currency: stmtrs.text(&["CURDEF"])?.to_owned(),
            bank_id: stmtrs.text(&["BANKACCTFROM", "BANKID"])?.to_owned(),
            branch_id: stmtrs.text(&["BANKACCTFROM", "BRANCHID"])?.to_owned(),
            account_id: stmtrs.text(&["BANKACCTFROM", "ACCTID"])?.to_owned(),
            account_type: stmtrs.text(&["BANKACCTFROM", "ACCTTYPE"])?.to_owned(),
        })
    }
}

/// A posted transaction (`<STMTTRN>`).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Movement {
    pub trntype: String,
    pub dtposted: Date,
    pub trnamt: Decimal,
    pub fitid: String,
    pub checknum: Option<String>,
    pub refnum: Option<String>,
    pub memo: Option<String>,
}

impl Movement {
    fn extract(stmttrn: &Cursor, dates: &DatePattern) -> Result<Self> {
        Ok(Movement {
            trntype: stmttrn.text(&["TRNTYPE"])?.to_owned(),
            dtposted: dates.parse(stmttrn.text(&["DTPOSTED"])?)?,
            trnamt: parse_amount(stmttrn.text(&["TRNAMT"])?)?,
            fitid: stmttrn.text(&["FITID"])?.to_owned(),
            checknum: stmttrn.opt_text(&["CHECKNUM"]).map(String::from),
            refnum: stmttrn.opt_text(&["REFNUM"]).map(String::from),
            memo: stmttrn.opt_text(&["MEMO"]).map(String::from),
        })
    }
}

/// The transactions of a statement (`<BANKTRANLIST>`).
///
/// The window bounds are kept as written; only the transactions' own dates are parsed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MovementsWindow {
    pub dtstart: String,
    pub dtend: String,
    pub movements: Vec<Movement>,
}

impl MovementsWindow {
    pub(crate) fn extract(root: &Cursor, dates: &DatePattern) -> Result<Self> {
        let banktranlist = root.descend(BANKTRANLIST)?;
        Ok(MovementsWindow {
            dtstart: banktranlist.text(&["DTSTART"])?.to_owned(),
            dtend: banktranlist.text(&["DTEND"])?.to_owned(),
            movements: banktranlist
                .children("STMTTRN")
                .iter()
                .map(|stmttrn| Movement::extract(stmttrn, dates))
                .collect::<Result<_>>()?,
        })
    }
}

/// The ledger balance of the account (`<LEDGERBAL>`).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LedgerBalance {
    pub balamt: Decimal,
    pub dtasof: Date,
}

impl LedgerBalance {
    pub(crate) fn extract(root: &Cursor, dates: &DatePattern) -> Result<Self> {
        let ledgerbal = root.descend(LEDGERBAL)?;
        Ok(LedgerBalance {
            balamt: parse_amount(ledgerbal.text(&["BALAMT"])?)?,
            dtasof: dates.parse(ledgerbal.text(&["DTASOF"])?)?,
        })
    }
}
