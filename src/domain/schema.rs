//! Fixed input requirements and output layout of the benefit claim report.

/// Column carrying the claim status in the claims export.
pub const STATUS_COLUMN: &str = "Status_Claim";

/// Only rows with this exact status are kept.
pub const READY_STATUS: &str = "R";

/// Columns coerced to dates when present. `Date` is not part of the report.
pub const DATE_COLUMNS: [&str; 4] = ["TreatmentStart", "TreatmentFinish", "Date", "PaymentDate"];

/// Header of the leading sequence column.
pub const SEQUENCE_HEADER: &str = "No";

pub const SHEET_NAME: &str = "Benefit Claim";

pub const OUTPUT_FILE_NAME: &str = "Transformed_Benefit_Claim_Data.xlsx";

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Fields copied into the report, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimField {
    ClientName,
    PolicyNo,
    ClaimNo,
    MemberNo,
    Membership,
    PatientName,
    EmpId,
    EmpName,
    ClaimType,
    ProductType,
    RoomOption,
    TreatmentRoomClass,
    TreatmentPlace,
    TreatmentStart,
    TreatmentFinish,
    Diagnosis,
    PaymentDate,
    Billed,
    Accepted,
    ExcessCoy,
    ExcessEmp,
    ExcessTotal,
    Unpaid,
}

impl ClaimField {
    pub const ALL: [ClaimField; 23] = [
        ClaimField::ClientName,
        ClaimField::PolicyNo,
        ClaimField::ClaimNo,
        ClaimField::MemberNo,
        ClaimField::Membership,
        ClaimField::PatientName,
        ClaimField::EmpId,
        ClaimField::EmpName,
        ClaimField::ClaimType,
        ClaimField::ProductType,
        ClaimField::RoomOption,
        ClaimField::TreatmentRoomClass,
        ClaimField::TreatmentPlace,
        ClaimField::TreatmentStart,
        ClaimField::TreatmentFinish,
        ClaimField::Diagnosis,
        ClaimField::PaymentDate,
        ClaimField::Billed,
        ClaimField::Accepted,
        ClaimField::ExcessCoy,
        ClaimField::ExcessEmp,
        ClaimField::ExcessTotal,
        ClaimField::Unpaid,
    ];

    /// Column name in the claims export.
    pub fn source(self) -> &'static str {
        match self {
            ClaimField::ClientName => "ClientName",
            ClaimField::PolicyNo => "PolicyNo",
            ClaimField::ClaimNo => "ClaimNo",
            ClaimField::MemberNo => "MemberNo",
            ClaimField::Membership => "Membership",
            ClaimField::PatientName => "PatientName",
            ClaimField::EmpId => "EmpID",
            ClaimField::EmpName => "EmpName",
            ClaimField::ClaimType => "ClaimType",
            ClaimField::ProductType => "ProductType",
            ClaimField::RoomOption => "RoomOption",
            ClaimField::TreatmentRoomClass => "TreatmentRoomClass",
            ClaimField::TreatmentPlace => "TreatmentPlace",
            ClaimField::TreatmentStart => "TreatmentStart",
            ClaimField::TreatmentFinish => "TreatmentFinish",
            ClaimField::Diagnosis => "PrimaryDiagnosis",
            ClaimField::PaymentDate => "PaymentDate",
            ClaimField::Billed => "Billed",
            ClaimField::Accepted => "Accepted",
            ClaimField::ExcessCoy => "ExcessCoy",
            ClaimField::ExcessEmp => "ExcessEmp",
            ClaimField::ExcessTotal => "ExcessTotal",
            ClaimField::Unpaid => "Unpaid",
        }
    }

    /// Column header in the report.
    pub fn destination(self) -> &'static str {
        match self {
            ClaimField::ClientName => "Client Name",
            ClaimField::PolicyNo => "Policy No",
            ClaimField::ClaimNo => "Claim No",
            ClaimField::MemberNo => "Member No",
            ClaimField::Membership => "Membership",
            ClaimField::PatientName => "Patient Name",
            ClaimField::EmpId => "Emp ID",
            ClaimField::EmpName => "Emp Name",
            ClaimField::ClaimType => "Claim Type",
            ClaimField::ProductType => "Product Type",
            ClaimField::RoomOption => "Room Option",
            ClaimField::TreatmentRoomClass => "Treatment Room Class",
            ClaimField::TreatmentPlace => "Treatment Place",
            ClaimField::TreatmentStart => "Treatment Start",
            ClaimField::TreatmentFinish => "Treatment Finish",
            ClaimField::Diagnosis => "Diagnosis",
            ClaimField::PaymentDate => "Payment Date",
            ClaimField::Billed => "Billed",
            ClaimField::Accepted => "Accepted",
            ClaimField::ExcessCoy => "Excess Coy",
            ClaimField::ExcessEmp => "Excess Emp",
            ClaimField::ExcessTotal => "Excess Total",
            ClaimField::Unpaid => "Unpaid",
        }
    }
}

/// Full report header row, sequence column first.
pub fn output_headers() -> Vec<&'static str> {
    std::iter::once(SEQUENCE_HEADER)
        .chain(ClaimField::ALL.iter().map(|f| f.destination()))
        .collect()
}
