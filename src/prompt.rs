//! Line-based prompts for the interactive session.

use anyhow::Result;
use std::io::{BufRead, Write};

use bikeshare_stats::config::City;
use bikeshare_stats::filter::{DayFilter, MonthFilter, TripFilter};

/// Reads answers from `input` and writes questions to `output`.
///
/// Every `ask*` method returns `Ok(None)` once input is exhausted.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Asks `question` and returns the trimmed, lowercased answer.
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    /// Re-asks `question` until `parse` accepts the answer.
    pub fn ask_until<T>(
        &mut self,
        question: &str,
        invalid: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            if let Some(value) = parse(&answer) {
                return Ok(Some(value));
            }
            writeln!(self.output, "{invalid}")?;
        }
    }

    /// Strict yes/no question; anything else is asked again.
    pub fn confirm(&mut self, question: &str) -> Result<Option<bool>> {
        self.ask_until(
            question,
            "Invalid input. Please enter 'yes' or 'no'.",
            |answer| match answer {
                "yes" => Some(true),
                "no" => Some(false),
                _ => None,
            },
        )
    }

    /// Collects a city, month and day selection.
    pub fn get_filters(&mut self) -> Result<Option<(City, TripFilter)>> {
        let Some(city) = self.ask_until(
            "Enter city (Chicago, New York City, Washington): ",
            "Invalid city. Please choose from Chicago, New York City, or Washington.",
            |answer| answer.parse::<City>().ok(),
        )?
        else {
            return Ok(None);
        };

        let Some(month) = self.ask_until(
            "Enter month (January to June) or 'all': ",
            "Invalid month. Please enter a month from January to June, or 'all'.",
            |answer| answer.parse::<MonthFilter>().ok(),
        )?
        else {
            return Ok(None);
        };

        let Some(day) = self.ask_until(
            "Enter day of week (e.g., Monday, Tuesday) or 'all': ",
            "Invalid day. Please enter a valid day of the week, or 'all'.",
            |answer| answer.parse::<DayFilter>().ok(),
        )?
        else {
            return Ok(None);
        };

        Ok(Some((city, TripFilter::new(month, day))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.output).unwrap()
    }

    #[test]
    fn test_ask_normalizes() {
        let mut p = prompter("  New York City \n");
        assert_eq!(p.ask("? ").unwrap().as_deref(), Some("new york city"));
        assert_eq!(p.ask("? ").unwrap(), None);
    }

    #[test]
    fn test_get_filters_reprompts_on_invalid_input() {
        let mut p = prompter("boston\nChicago\njuly\nMarch\nfunday\nFriday\n");
        let (city, filter) = p.get_filters().unwrap().unwrap();

        assert_eq!(city, City::Chicago);
        assert_eq!(filter.month, MonthFilter::Month(3));
        assert_eq!(filter.day, DayFilter::Day(Weekday::Fri));

        let text = transcript(p);
        assert!(text.contains("Invalid city."));
        assert!(text.contains("Invalid month."));
        assert!(text.contains("Invalid day."));
    }

    #[test]
    fn test_get_filters_eof() {
        let mut p = prompter("washington\n");
        assert!(p.get_filters().unwrap().is_none());
    }

    #[test]
    fn test_confirm() {
        let mut p = prompter("maybe\nYES\nno\n");
        assert_eq!(p.confirm("more? ").unwrap(), Some(true));
        assert_eq!(p.confirm("more? ").unwrap(), Some(false));
        assert_eq!(p.confirm("more? ").unwrap(), None);
        assert!(transcript(p).contains("Please enter 'yes' or 'no'."));
    }
}
