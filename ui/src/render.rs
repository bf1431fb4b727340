use std::fmt::{self, Write};
use voter_lookup::client::highlight::Highlighter;
use voter_lookup::client::view::SearchView;
use voter_lookup::search::types::VoterRecord;

const MARK_OPEN: &str = "\x1b[7m";
const MARK_CLOSE: &str = "\x1b[0m";

/// Prints view changes to stdout as they settle.
///
/// Output happens on fetch start, fetch completion and reset; intermediate
/// keystrokes stay quiet.
#[derive(Default)]
pub struct Renderer {
    was_in_flight: bool,
    /// Mode of the fetch in flight (or last finished): load more vs fresh search.
    appending: bool,
    printed: usize,
}

impl Renderer {
    pub fn update(&mut self, view: &SearchView) {
        let mut out = String::new();
        if let Err(e) = self.render(view, &mut out) {
            tracing::warn!("Failed to render view: {}", e);
        }
        print!("{}", out);
    }

    pub fn render(&mut self, view: &SearchView, out: &mut impl Write) -> fmt::Result {
        let in_flight = view.is_in_flight();

        if in_flight && !self.was_in_flight {
            self.appending = view.is_loading_more();
            if self.appending {
                writeln!(out, "Loading more...")?;
            } else {
                writeln!(out, "Searching...")?;
            }
        } else if !in_flight && self.was_in_flight {
            self.write_results(view, out)?;
        } else if view.query().trim().is_empty() && self.printed > 0 {
            self.printed = 0;
            writeln!(out, "Ready to search. Enter a name or voter ID.")?;
        }

        self.was_in_flight = in_flight;
        Ok(())
    }

    fn write_results(&mut self, view: &SearchView, out: &mut impl Write) -> fmt::Result {
        let results = view.results();

        if results.is_empty() {
            self.printed = 0;
            if !view.query().trim().is_empty() {
                writeln!(
                    out,
                    "No results found. Try a different name, voter ID, or house number."
                )?;
            }
            return Ok(());
        }

        // Only a fresh search starts the list over; a failed load more prints nothing new
        if !self.appending || results.len() < self.printed {
            self.printed = 0;
            let total = view.total();
            writeln!(out, "Found {} voter{}", total, if total != 1 { "s" } else { "" })?;
        }

        let highlighter = view.highlighter();
        for voter in &results[self.printed..] {
            write_card(out, voter, &highlighter)?;
        }
        self.printed = results.len();

        if view.has_more() {
            writeln!(
                out,
                "-- {} of {} shown, /more for the next page --",
                results.len(),
                view.total()
            )?;
        } else if view.total() > view.limit() {
            writeln!(out, "You've viewed all {} matching voters", view.total())?;
        }
        Ok(())
    }
}

fn write_card(out: &mut impl Write, voter: &VoterRecord, h: &Highlighter) -> fmt::Result {
    let mark = |text: &str| h.render(text, MARK_OPEN, MARK_CLOSE);

    writeln!(out)?;
    writeln!(
        out,
        "{}  {}    Serial {}",
        mark(&voter.name_en),
        mark(&voter.name_ml),
        voter.serial
    )?;
    writeln!(out, "  Voter ID:        {}", mark(&voter.voter_id))?;
    writeln!(out, "  Polling station: {}", mark(&voter.polling_station))?;
    writeln!(
        out,
        "  House:           {} {} / {}",
        mark(&voter.house_no),
        mark(&voter.house_name_en),
        mark(&voter.house_name_ml)
    )?;
    writeln!(out, "  Gender & age:    {} • {} years", voter.gender, voter.age)?;
    writeln!(out, "  Ward:            {} - {}", voter.ward, voter.ward_name)?;
    writeln!(
        out,
        "  Guardian:        {} / {}",
        mark(&voter.guardian_en),
        mark(&voter.guardian_ml)
    )?;
    writeln!(out, "  District:        {}, {}", voter.district, voter.local_body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;
    use voter_lookup::client::view::FetchRequest;
    use voter_lookup::search::types::{Pagination, SearchResponse};

    fn voter(id: i64) -> VoterRecord {
        VoterRecord {
            id,
            serial: id,
            name_en: format!("Ravi {:02}", id),
            name_ml: String::new(),
            guardian_en: String::new(),
            guardian_ml: String::new(),
            house_no: format!("12/{}", id),
            house_name_en: String::new(),
            house_name_ml: String::new(),
            gender: "M".to_string(),
            age: 40,
            voter_id: format!("RV{:05}", id),
            ward: "049".to_string(),
            ward_name: "KAIKULANGARA".to_string(),
            polling_station: "Govt. LP School".to_string(),
            district: "Kollam".to_string(),
            local_body: "Kollam Corporation".to_string(),
        }
    }

    fn page(request: &FetchRequest, total: i64) -> SearchResponse {
        let pagination = Pagination::new(request.page, request.limit);
        let window = (pagination.offset() + 1..=total)
            .take(pagination.limit as usize)
            .map(voter)
            .collect();
        SearchResponse::from_window(pagination, total, window)
    }

    /// Renders one view change, the way the driver reports it.
    fn step(renderer: &mut Renderer, view: &SearchView) -> String {
        let mut out = String::new();
        renderer.render(view, &mut out).unwrap();
        out
    }

    fn cards(out: &str) -> usize {
        out.matches("Voter ID:").count()
    }

    /// Runs a fresh search for `total` matches and returns the completion output.
    fn fresh_search(renderer: &mut Renderer, view: &mut SearchView, total: i64) -> String {
        view.set_query("ravi", Instant::now());
        let request = view.submit().unwrap();
        assert_eq!(step(renderer, view), "Searching...\n");
        view.complete(&request, Ok(page(&request, total)));
        step(renderer, view)
    }

    #[test]
    fn test_fresh_search_prints_header_and_cards() {
        let mut renderer = Renderer::default();
        let mut view = SearchView::default();

        let out = fresh_search(&mut renderer, &mut view, 25);

        assert!(out.starts_with("Found 25 voters\n"));
        assert_eq!(cards(&out), 20);
        assert!(out.contains("\x1b[7mRavi\x1b[0m 01"));
        assert!(out.ends_with("-- 20 of 25 shown, /more for the next page --\n"));
    }

    #[test]
    fn test_single_match_is_singular() {
        let mut renderer = Renderer::default();
        let mut view = SearchView::default();

        let out = fresh_search(&mut renderer, &mut view, 1);

        assert!(out.starts_with("Found 1 voter\n"));
        assert_eq!(cards(&out), 1);
        assert!(!out.contains("viewed all"));
    }

    #[test]
    fn test_load_more_prints_only_new_cards() {
        let mut renderer = Renderer::default();
        let mut view = SearchView::default();
        fresh_search(&mut renderer, &mut view, 25);

        let request = view.load_more().unwrap();
        assert_eq!(step(&mut renderer, &view), "Loading more...\n");
        view.complete(&request, Ok(page(&request, 25)));
        let out = step(&mut renderer, &view);

        assert!(!out.contains("Found"));
        assert_eq!(cards(&out), 5);
        assert!(out.contains("RV00021"));
        assert!(!out.contains("RV00020"));
        assert!(out.ends_with("You've viewed all 25 matching voters\n"));
    }

    #[test]
    fn test_failed_load_more_does_not_reprint() {
        let mut renderer = Renderer::default();
        let mut view = SearchView::default();
        fresh_search(&mut renderer, &mut view, 25);

        let request = view.load_more().unwrap();
        step(&mut renderer, &view);
        view.complete(&request, Err(anyhow::anyhow!("timed out")));
        let out = step(&mut renderer, &view);

        assert!(!out.contains("Found"));
        assert_eq!(cards(&out), 0);
        assert_eq!(out, "-- 20 of 25 shown, /more for the next page --\n");
    }

    #[test]
    fn test_new_search_after_load_more_starts_over() {
        let mut renderer = Renderer::default();
        let mut view = SearchView::default();
        fresh_search(&mut renderer, &mut view, 25);
        let request = view.load_more().unwrap();
        step(&mut renderer, &view);
        view.complete(&request, Ok(page(&request, 25)));
        step(&mut renderer, &view);

        let request = view.submit().unwrap();
        step(&mut renderer, &view);
        view.complete(&request, Ok(page(&request, 3)));
        let out = step(&mut renderer, &view);

        assert!(out.starts_with("Found 3 voters\n"));
        assert_eq!(cards(&out), 3);
    }

    #[test]
    fn test_no_results_and_clear() {
        let mut renderer = Renderer::default();
        let mut view = SearchView::default();

        let out = fresh_search(&mut renderer, &mut view, 0);
        assert_eq!(
            out,
            "No results found. Try a different name, voter ID, or house number.\n"
        );

        fresh_search(&mut renderer, &mut view, 2);
        view.set_query("", Instant::now());
        assert_eq!(
            step(&mut renderer, &view),
            "Ready to search. Enter a name or voter ID.\n"
        );
    }
}
