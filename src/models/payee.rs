//! Payee model and its compensation records.
//!
//! A [`Payee`] is one compensated party in a payroll run. Payees are supplied
//! by an external onboarding source and mutated in place while the wizard is
//! open (selection toggles, rate and adjustment edits).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of party being paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayeeType {
    /// A direct employee.
    Employee,
    /// A worker paid through their own corporate entity.
    LoanOut,
    /// A vendor supplying goods or services.
    Vendor,
    /// An independent contractor.
    Contractor,
    /// A talent agent.
    Agent,
    /// A talent manager.
    Manager,
    /// A trust account held for a minor.
    ChildTrust,
}

/// Which wizard screen a payee is selected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayeeGroup {
    /// Employees, loan-outs and child trusts.
    Employees,
    /// Vendors, contractors, agents and managers.
    Vendors,
}

impl PayeeType {
    /// Returns the wizard screen this kind of payee is listed on.
    ///
    /// ```
    /// use payroll_engine::models::{PayeeGroup, PayeeType};
    ///
    /// assert_eq!(PayeeType::LoanOut.group(), PayeeGroup::Employees);
    /// assert_eq!(PayeeType::Agent.group(), PayeeGroup::Vendors);
    /// ```
    pub fn group(&self) -> PayeeGroup {
        match self {
            PayeeType::Employee | PayeeType::LoanOut | PayeeType::ChildTrust => {
                PayeeGroup::Employees
            }
            PayeeType::Vendor | PayeeType::Contractor | PayeeType::Agent | PayeeType::Manager => {
                PayeeGroup::Vendors
            }
        }
    }
}

/// Whether the payee finished onboarding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnboardingStatus {
    /// Onboarding paperwork is complete.
    Onboarded,
    /// Onboarding is still outstanding.
    #[default]
    NotOnboarded,
}

/// How the payee's rate is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RateType {
    /// Paid per hour.
    Hourly,
    /// Paid per day.
    Daily,
    /// Paid per week.
    Weekly,
    /// Fixed salary for the period.
    Salary,
    /// A percentage of another party's pay (agents, managers).
    Percentage,
}

/// How the payee receives money.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Direct deposit.
    #[default]
    Ach,
    /// A mailed paper check.
    Check,
}

/// The category of a deduction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeductionType {
    /// Withheld tax.
    Tax,
    /// Union dues withheld from pay.
    UnionDues,
    /// Agent commission.
    AgentFee,
    /// Manager commission.
    ManagerFee,
    /// Retirement plan contribution.
    #[serde(rename = "401k")]
    K401,
    /// Anything else.
    #[default]
    Other,
}

/// An ad hoc rate modifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Adjustment {
    /// Stable id within the payee.
    pub id: String,
    /// Amount added to gross pay.
    pub rate: Decimal,
    /// Unit the rate is expressed in.
    pub unit: String,
    /// Accounting code.
    pub code: String,
    /// Accounting class.
    pub class: String,
    /// Free-form note.
    pub note: String,
}

/// A recurring bonus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Increment {
    /// Stable id within the payee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Amount added to gross pay.
    pub rate: Decimal,
    /// Unit the rate is expressed in.
    pub unit: String,
    /// Accounting code.
    pub code: String,
    /// Accounting class.
    pub class: String,
}

/// An amount withheld from the payee's pay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Deduction {
    /// Stable id within the payee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Amount withheld.
    pub amount: Decimal,
    /// Category of the deduction.
    #[serde(rename = "type")]
    pub deduction_type: DeductionType,
}

/// An allowance paid on top of wages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Allowance {
    /// Stable id within the payee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Whether the allowance counts as taxable income.
    pub taxable: bool,
}

/// An expense paid back to the payee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reimbursement {
    /// Stable id within the payee.
    pub id: String,
    /// Amount paid back.
    pub amount: Decimal,
    /// Accounting code.
    pub code: String,
    /// Accounting class.
    pub class: String,
    /// Free-form note.
    pub note: String,
    /// Reference to an uploaded receipt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

/// One compensated party in a payroll run.
///
/// Absent collections and numeric fields deserialize as empty/zero. The
/// `ssn` field is accepted from the payee source but never serialized, so a
/// raw SSN cannot leave the engine through a serialized payee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payee {
    /// Unique identifier, stable for the run.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// The kind of party being paid.
    #[serde(rename = "type")]
    pub payee_type: PayeeType,
    /// Onboarding state reported by the payee source.
    #[serde(default)]
    pub onboarding_status: OnboardingStatus,
    /// Whether the payee is included in this run.
    #[serde(default)]
    pub selected: bool,
    /// How `rate` is expressed.
    pub rate_type: RateType,
    /// Base rate for the period.
    #[serde(default)]
    pub rate: Decimal,
    /// Union affiliation, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub union: Option<String>,
    /// Job title used for union sub-totals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Department used for department totals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Ad hoc rate modifiers.
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
    /// Recurring bonuses.
    #[serde(default)]
    pub increments: Vec<Increment>,
    /// Amounts withheld from pay.
    #[serde(default)]
    pub deductions: Vec<Deduction>,
    /// Allowances paid on top of wages.
    #[serde(default)]
    pub allowances: Vec<Allowance>,
    /// Expenses paid back.
    #[serde(default)]
    pub reimbursements: Vec<Reimbursement>,
    /// Timesheet approval, tracked for employees only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timesheet_approved: Option<bool>,
    /// How the payee receives money.
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Social security number. Input only.
    #[serde(default, skip_serializing)]
    pub ssn: Option<String>,
}

impl Payee {
    /// Creates an unselected, not-onboarded payee with no records.
    ///
    /// ```
    /// use payroll_engine::models::{Payee, PayeeType, RateType};
    /// use rust_decimal::Decimal;
    ///
    /// let payee = Payee::new("emp_001", "Dana Reyes", PayeeType::Employee, RateType::Weekly, Decimal::from(2000));
    /// assert!(!payee.selected);
    /// assert!(payee.deductions.is_empty());
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        payee_type: PayeeType,
        rate_type: RateType,
        rate: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            payee_type,
            onboarding_status: OnboardingStatus::NotOnboarded,
            selected: false,
            rate_type,
            rate,
            union: None,
            job_title: None,
            department: None,
            adjustments: Vec::new(),
            increments: Vec::new(),
            deductions: Vec::new(),
            allowances: Vec::new(),
            reimbursements: Vec::new(),
            timesheet_approved: None,
            payment_method: PaymentMethod::Ach,
            ssn: None,
        }
    }

    /// Returns the union name, treating blank strings as no affiliation.
    pub fn union_name(&self) -> Option<&str> {
        non_blank(self.union.as_deref())
    }

    /// Returns true if the payee belongs to a union.
    pub fn is_unionized(&self) -> bool {
        self.union_name().is_some()
    }

    /// Returns the department, or `fallback` when none is recorded.
    pub fn department_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_blank(self.department.as_deref()).unwrap_or(fallback)
    }

    /// Returns the job title, or `fallback` when none is recorded.
    pub fn job_title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_blank(self.job_title.as_deref()).unwrap_or(fallback)
    }

    /// Returns true if a mailed check will be issued for this payee.
    pub fn is_paid_by_check(&self) -> bool {
        self.payment_method == PaymentMethod::Check
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
