use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // ACCESS CONTROL ERRORS (10-19)
    // ============================================
    /// Caller is neither the owner nor an operator
    Unauthorized = 10,
    /// Caller tried to add itself as an operator
    SelfReference = 11,
    /// Operator set is already at `max_operators`
    CapacityReached = 12,
    /// Candidate is already the owner or an operator
    AlreadyOperator = 13,
    /// Target is not in the operator set
    NotOperator = 14,

    // ============================================
    // STOCK ERRORS (20-29)
    // ============================================
    /// Not enough units left for this sale
    OutOfStock = 20,
    /// Quantity must be positive
    InvalidQuantity = 21,

    // ============================================
    // PAYMENT ERRORS (30-39)
    // ============================================
    /// Paid amount differs from the applicable price
    PriceMismatch = 30,
    /// Token allowance granted to the ledger is too small
    InsufficientAllowance = 31,
    /// Token balance of the caller is too small
    InsufficientBalance = 32,
    /// No secondary currency configured at initialization
    SecondaryCurrencyDisabled = 33,
    /// Caller still holds an unused return discount
    ReturnCreditPending = 34,

    // ============================================
    // ESCROW ERRORS (40-49)
    // ============================================
    /// Nothing recorded for this payee
    NothingToWithdraw = 40,

    // ============================================
    // CONFIGURATION ERRORS (50-59)
    // ============================================
    /// Prices must be positive
    InvalidPrice = 50,
    /// Discounts must be within 0..=10_000 basis points
    InvalidDiscount = 51,
    /// Secondary currency must differ from the native asset
    InvalidSecondaryCurrency = 52,

    // ============================================
    // OPERATIONAL ERRORS (60-69)
    // ============================================
    /// Checked arithmetic on stock or amounts overflowed
    ArithmeticOverflow = 60,
    /// Contract is paused
    ContractPaused = 61,
}
