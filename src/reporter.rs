use std::io::Write;

/// Fixed interpretation of the 50/200-day averages. Not derived from the data.
pub const INSIGHTS: &str = "
Key Insights from 50 & 200 Moving Averages:

1. **Bounce Back from MA (Support & Resistance)**
   - If the stock price bounces up after touching the 50-day MA, it indicates bullish strength.
   - If price bounces from the 200-day MA, it’s a strong bullish signal (trend continuation).
   - If price breaks below the 200-day MA, it’s a bearish sign (trend reversal).

2. **Golden Cross & Death Cross (Trend Change Signals)**
   - **Golden Cross**: When the 50-day MA crosses above the 200-day MA → Bullish trend (Buy Signal).
   - **Death Cross**: When the 50-day MA crosses below the 200-day MA → Bearish trend (Sell Signal).
";

pub fn write_report(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", INSIGHTS)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_the_fixed_text() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        write_report(&mut first).unwrap();
        write_report(&mut second).unwrap();
        let text = String::from_utf8(first.clone()).unwrap();
        assert_eq!(first, second);
        assert!(text.contains("Golden Cross"));
        assert!(text.contains("Death Cross"));
        assert!(text.contains("200-day MA"));
    }
}
