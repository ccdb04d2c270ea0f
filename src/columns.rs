// Column names of the GFGP scorecard export and the fixed lists built from them.
//
// Header names are trimmed by the loader, so every constant here is the
// trimmed form of the header as it appears in the file. A header that occurs
// twice in the file gets a `.1` suffix on its second occurrence.

pub const NAME: &str = "Name of institution";
/// Header used for the name by the older scorecard export.
pub const NAME_ALIAS: &str = "Institution Name";
pub const COUNTRY: &str = "Country";
pub const INSTITUTION_TYPE: &str = "Type of institution";

pub const SELF_ASSESSMENT_SCORE: &str = "GFGP Self-Assessment Score";
pub const ASSESSMENT_LEVEL: &str = "GFGP Assessment Level";
pub const DUE_DILIGENCE_SCORE: &str = "KPMG's due diligence overall score";
pub const SCORE: &str = "SCORE";
pub const INPUT_SCORE: &str = "Overall Input Score";
pub const OUTPUT_SCORE: &str = "Overall Output Score";
pub const IMPACT_SCORE: &str = "Overall Impact Score";

pub const RISK_RATING: &str = "Risk Rating";
pub const RISK_RATING_DETAILS: &str = "Details of the Risk Rating";
pub const OVERALL_ASSESSMENT: &str = "Overall Assessment";
pub const GRANTS_MANAGEMENT: &str = "Grants administration and management policy";
pub const INTERNAL_AUDIT: &str = "Presence of an internal audit unit";
pub const EXTERNAL_AUDIT: &str = "external audit unit";

pub const MEDICAL_DEPARTMENT: &str = "Medical Dep";
pub const AGRICULTURE_DEPARTMENT: &str = "Agri Dep";
pub const SOCIOLOGY_DEPARTMENT: &str = "Sociology";
pub const BUSINESS_DEPARTMENT: &str = "Business/ commerce/Economics Dep";

/// Columns parsed as numbers at load time.
pub const NUMERIC_COLUMNS: [&str; 6] = [
    SELF_ASSESSMENT_SCORE,
    DUE_DILIGENCE_SCORE,
    SCORE,
    INPUT_SCORE,
    OUTPUT_SCORE,
    IMPACT_SCORE,
];

pub const FINANCIAL_MANAGEMENT: [&str; 23] = [
    "Finance manual",
    "Audit book",
    "Audit Committee",
    "Financial and budget committee",
    "Developed an indirect cost recovery policy",
    "Defined the minimum and maximum amount of cash for normal operations",
    "Complete assets register",
    "Defined policy on safety and security of assets and ownership documents",
    "Defined policy on use of assets",
    "Defined policy on insurance of assets",
    "Defined indirect expenditure allocation procedures",
    "Consistency on asset disposal procedure as outlined",
    "Value of insurance cover for inventory",
    "Policy for recording, retaining and disposing of all financial documents and data",
    "Clear guidance on treatment of exchange rates and how any potential exchange gains or losses would be dealt with.",
    "Guidelines on manual data addition to extracted financial reports",
    "Weaknesses in the access to university online systems",
    "Register on management of operational issues in financial management system",
    "Defined process of returning inventory to storage",
    "Guidance on travel costs such as per-diem rates and recovery of mileage where personal vehicles are used",
    "Procedure for cash disbursement to staff and accounting for the same.",
    "Separation of duties in cash and bank management",
    "Sub-grantee management",
];

pub const PROCUREMENT: [&str; 6] = [
    "University  procurement procedure documented in the finance manual /Procurement manual",
    "University  procurement procedure is aligned with country  Public Procurement and Disposal of Public Assets Authority (PPDA)",
    "Manual stipulating the procedure to be followed in identifying, selecting, and acquiring needed goods and services as economically as possible within specified standards of quality and service",
    "Procedure on handling customer complaints",
    "Procedure for conducting frequent market checks",
    "Security storage for vendor or supplier contracts",
];

pub const HUMAN_RESOURCES: [&str; 7] = [
    "Vacancy announcements  made outlining the minimum set of skills, knowledge, and experience necessary for a successful candidate",
    "Policy on separation of duties with regards to the  payroll system",
    "Defined a management structure that de\u{c3}\u{9e}ned roles, chain of command and authorizations levels",
    "Mechanism for accounting for time spent by project staff such as timesheets",
    "procedure for responding to allegations of bribery, corruption, and fraud",
    "Whistleblowing hotline where staff and students can report suspected misconduct or illegal acts anonymously without having their identity known.",
    "Documentation of training plans and staff development plan",
];

pub const GOVERNANCE: [&str; 4] = [
    "Principal Investigator (PI) responsible for oversight, budget control, risk management and decision-making regarding project implementation",
    "University senior management is involved in the management of donor-funded projects",
    "Presence of grants administration and management policy",
    "Disaster recovery and business continuity plan.",
];

pub const RISK_MANAGEMENT: [&str; 9] = [
    "Well-documented risk management policy",
    "Risk assessment performed for this project to identify risks inherent to the project and have in place mitigating measures.",
    "Risk Management Committee (RMC) in place",
    "Risk registers present",
    "Disseminated its Code of Ethics to the public",
    "Politically Exposed Persons (PEPs) in the institution",
    "Environmental protection policy",
    "Preseance of a Disaster Response Plan and disaster recovery testing",
    "Presence of succession plan",
];

pub const FIDUCIARY_FINDINGS: [&str; 39] = [
    "Disaster recovery and business continuity plan had not been put in place",
    "Payroll processing roles not sufficiently separated",
    "Indirect cost recovery policy had not been formulated",
    "Undefined cash limits for normal operations",
    "Risk assessment guidelines / policy had not been defined",
    "Lack of an environmental protection policy",
    "Lack of a policy for recording, retaining and disposing of financial information",
    "Organogram had not been documented",
    "Procedure for valuation of inventory insurance cover had not been defined/Weakness in Inventory Management",
    "Undefined procedure for returning inventory to store after usage",
    "Undefined insurance policy on inventory",
    "Procedure on asset verification had not been documented",
    "Procedure for recording time spent by project staff had not been documented",
    "The university did not have a policy for establishing and reviewing the salary structure",
    "Politically Exposed Entity and Persons (PIE/PEPs)",
    "No guidance on exchange rate assumptions",
    "No guidance on the definition and treatment of in-kind contributions",
    "Inadequate cash and bank management procedures",
    "Undefined procedures on monitoring budget execution",
    "Weaknesses in asset management",
    "Weaknesses around financial reporting and enhancing compliance to grant conditions",
    "Undefined provisions in the procurement procedure manual",
    "Lack of a risk register",
    "Training needs assessments had not been conducted",
    "No formal policy on in-kind contributions",
    "Weakness in the contract management process",
    "Absence of procedure on identifying and resolving operational issues within the financial system",
    "Absence of a documented procedure on sub-grantee and sub-contractor contract management",
    "Lack of a whistleblowing policy.",
    "Weaknesses in the access to university online systems.1",
    "Misalignment in the asset disposal procedure as outlined in FAM and ADM",
    "Undefined process for approval of project budget overruns",
    "Absence of requirement for recruitment staff to declare their conflict of interest.",
    "Absence of a succession plan",
    "There are no procedures for guiding on cash advanced to staff and accounting for the same",
    "There are no policy guidelines in managing travel expenses such as per diem and mileage recovery",
    "Inadequate procedures for accounting for project funds received in the University\u{c3}\u{95}s bank account",
    "Inadequate separation of duties in the preparation and review of bank reconciliations",
    "There are no procedures for checking market prices for goods and services",
];

/// Countries an institution can be classified under.
pub const COUNTRIES: [&str; 54] = [
    "Algeria",
    "Angola",
    "Benin",
    "Botswana",
    "Burkina Faso",
    "Burundi",
    "Cameroon",
    "Cape Verde",
    "Central African Republic",
    "Chad",
    "Comoros",
    "Democratic Republic of the Congo",
    "Djibouti",
    "Egypt",
    "Equatorial Guinea",
    "Eritrea",
    "Eswatini",
    "Ethiopia",
    "Gabon",
    "Ghana",
    "Guinea",
    "Guinea-Bissau",
    "Ivory Coast",
    "Kenya",
    "Lesotho",
    "Liberia",
    "Libya",
    "Madagascar",
    "Malawi",
    "Mali",
    "Mauritania",
    "Mauritius",
    "Morocco",
    "Mozambique",
    "Namibia",
    "Niger",
    "Nigeria",
    "Republic of the Congo",
    "Rwanda",
    "Sao Tome and Principe",
    "Senegal",
    "Seychelles",
    "Sierra Leone",
    "Somalia",
    "South Africa",
    "South Sudan",
    "Sudan",
    "Tanzania",
    "The Gambia",
    "Togo",
    "Tunisia",
    "Uganda",
    "Zambia",
    "Zimbabwe",
];

pub fn is_known_country(country: &str) -> bool {
    COUNTRIES.contains(&country)
}
