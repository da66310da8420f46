//! The fixed instructional prompt sent with every analysis request.
//!
//! Centralising the prompt here serves two purposes:
//!
//! 1. **Single source of truth** — the JSON schema the model is told to emit
//!    and the typed [`crate::report::StatementReport`] structure must agree;
//!    keeping the prompt in one place makes schema drift easy to spot.
//!
//! 2. **Testability** — unit tests can assert schema field names appear in
//!    the prompt without calling a real model.
//!
//! The prompt is a process-wide constant by design: the analysis contract
//! (classify, extract, analyse, strict JSON) is not a per-request knob.

/// Instructional prompt for bank statement analysis.
///
/// The model must answer with a single JSON object; the `analysis` field is
/// the one deliberate exception to machine-readability — it carries a
/// human-readable prose summary.
pub const ANALYSIS_PROMPT: &str = r#"You are a financial document analyzer.

Analyze the attached PDF.

Step 1: Determine whether the document is a bank statement.
Step 2: If it IS a bank statement, extract details and transactions.
Step 3: Using ONLY the extracted transactions, perform financial analysis.
Step 4: If it is NOT a bank statement, return empty fields.

IMPORTANT OUTPUT RULES:
- The overall response MUST be valid JSON.
- All fields EXCEPT the "analysis" field must strictly follow the schema.
- The "analysis" field must be a HUMAN-READABLE TEXT SUMMARY, not JSON.
- Do NOT include explanations or extra text outside the JSON.
- Do NOT guess values.
- If information is missing, use null.

Return JSON in EXACTLY this format:

{
  "is_bank_statement": true | false,
  "bank_name": string | null,
  "account_name": string | null,
  "CIF_ID": string | null,
  "IFSC": string | null,
  "statement_period": {
    "from": string | null,
    "to": string | null
  },
  "transactions": [
    {
      "date": string,
      "description": string,
      "debit": number | null,
      "credit": number | null,
      "balance": number | null
    }
  ],
  "analysis": string | null
}

ANALYSIS GUIDELINES:
- Write the analysis as a clear, professional, human-readable paragraph(s)
- Base the analysis ONLY on the extracted transactions
- Include:
  • Spending and income behavior
  • Major transaction patterns
  • Large or unusual movements
  • Overall financial insights
- Do NOT use JSON, bullet arrays, or key-value formatting inside "analysis"


SPECIAL CASE:
If the document is NOT a bank statement:
- is_bank_statement = false
- transactions = []
- analysis = null

Output JSON only.
"#;
