//! Prompt text sent with every analysis request.

/// Persona the model answers as.
pub const SYSTEM_INSTRUCTION: &str = "You are WealthArchitect AI, a sophisticated investment \
companion. Your tone is professional, encouraging, and analytical. You help the user reach \
Rp1 Billion by 2029.";

/// Builds the extraction prompt around the user's notes.
pub fn build_prompt(notes: &str) -> String {
    format!(
        "You are an expert financial analyst and portfolio manager.\n\
Analyze the provided notes and/or portfolio screenshots.\n\
\n\
Your goal is to create a detailed \"Investment Growth Journal\" entry.\n\
\n\
1. Extract specific numbers: Total Assets, P&L, and Asset Allocation. If multiple images are \
provided, aggregate the data if they represent different accounts, or take the latest if they \
are updates.\n\
2. Generate a professional Markdown summary titled \"Investment Growth Journal — [Month Year]\".\n\
3. Identify key insights, market conditions, and specific actionable advice for the next month.\n\
4. Structure the 'content' field with Markdown headers (##), bold text, and bullet points.\n\
5. Create a structured action plan.\n\
\n\
User Notes: \"{}\"\n\
\n\
Return the response in strict JSON format adhering to the schema.",
        notes
    )
}
