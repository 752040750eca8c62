//! Extraction of departures from the next-departures XML document
//!
//! The document nests
//! `AgencyList/Agency/RouteList/Route/RouteDirectionList/RouteDirection/StopList/Stop/DepartureTimeList/DepartureTime`
//! below its root element. Only elements on exactly that path are read;
//! anything else is skipped along with its subtree.

use std::mem;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::DepartureFeedError;
use crate::models::FeedDeparture;

/// Element names below the document root, outermost first
const DEPARTURE_PATH: [&[u8]; 10] = [
    b"AgencyList",
    b"Agency",
    b"RouteList",
    b"Route",
    b"RouteDirectionList",
    b"RouteDirection",
    b"StopList",
    b"Stop",
    b"DepartureTimeList",
    b"DepartureTime",
];

// Stack depth of each named level, with the root element at depth 0
const ROUTE_DEPTH: usize = 4;
const DIRECTION_DEPTH: usize = 6;
const STOP_DEPTH: usize = 8;
const DEPARTURE_TIME_DEPTH: usize = 10;

/// Parse a next-departures document into one entry per stop element that
/// lists at least one departure time
///
/// Stop elements without departure times are dropped. Name attributes are
/// matched case-insensitively (`name` or `Name`); a missing one leaves the
/// field `None`. Departure time text is passed through untouched.
///
/// # Errors
///
/// Returns `DepartureFeedError::ParseError` if the document is not well-formed
/// XML. No partial result is returned in that case.
pub fn parse_departures_xml(xml: &str) -> Result<Vec<FeedDeparture>, DepartureFeedError> {
    // Text is left untrimmed; whitespace outside DepartureTime is never read
    let mut reader = Reader::from_str(xml);

    let mut walker = DepartureWalker::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => walker.open(&e)?,
            Ok(Event::Empty(e)) => {
                walker.open(&e)?;
                walker.close()?;
            },
            Ok(Event::End(_)) => walker.close()?,
            Ok(Event::Text(e)) => {
                if walker.in_departure_time() {
                    let text = e.unescape().map_err(parse_error)?;
                    walker.push_text(&text);
                }
            },
            Ok(Event::CData(e)) => {
                if walker.in_departure_time() {
                    let text = std::str::from_utf8(&e).map_err(parse_error)?;
                    walker.push_text(text);
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DepartureFeedError::ParseError(format!(
                    "{e} at byte {}",
                    reader.buffer_position()
                )));
            },
            _ => {},
        }
    }

    walker.finish()
}

fn parse_error(e: impl std::fmt::Display) -> DepartureFeedError {
    DepartureFeedError::ParseError(e.to_string())
}

/// Tracks where the reader is in the document and collects departures
#[derive(Debug, Default)]
struct DepartureWalker {
    /// Local names of the currently open elements, root first
    stack: Vec<Vec<u8>>,
    /// How many leading entries of `stack` lie on the departure path
    on_path: usize,
    seen_root: bool,
    route_name: Option<String>,
    route_direction: Option<String>,
    stop_name: Option<String>,
    departure_times: Vec<String>,
    current_time: Option<String>,
    departures: Vec<FeedDeparture>,
}

impl DepartureWalker {
    fn open(&mut self, element: &BytesStart<'_>) -> Result<(), DepartureFeedError> {
        let local_name = element.local_name();
        let name = local_name.as_ref();
        let depth = self.stack.len();

        if depth == 0 {
            if self.seen_root {
                return Err(DepartureFeedError::ParseError(
                    "document has more than one root element".to_string(),
                ));
            }
            self.seen_root = true;
            self.on_path = 1;
        } else if self.on_path == depth && DEPARTURE_PATH.get(depth - 1) == Some(&name) {
            self.on_path = depth + 1;
            match depth {
                ROUTE_DEPTH => self.route_name = name_attribute(element)?,
                DIRECTION_DEPTH => self.route_direction = name_attribute(element)?,
                STOP_DEPTH => {
                    self.stop_name = name_attribute(element)?;
                    self.departure_times.clear();
                },
                DEPARTURE_TIME_DEPTH => self.current_time = Some(String::new()),
                _ => {},
            }
        }

        self.stack.push(name.to_vec());
        Ok(())
    }

    fn close(&mut self) -> Result<(), DepartureFeedError> {
        let depth = self.stack.len();
        if self.stack.pop().is_none() {
            return Err(DepartureFeedError::ParseError(
                "closing tag without a matching opening tag".to_string(),
            ));
        }

        if self.on_path != depth {
            return Ok(());
        }
        self.on_path = depth - 1;

        match depth - 1 {
            DEPARTURE_TIME_DEPTH => {
                let time = self.current_time.take().unwrap_or_default();
                self.departure_times.push(time);
            },
            STOP_DEPTH if !self.departure_times.is_empty() => {
                self.departures.push(FeedDeparture {
                    route_name: self.route_name.clone(),
                    route_direction: self.route_direction.clone(),
                    stop_name: self.stop_name.take(),
                    departure_times: mem::take(&mut self.departure_times),
                });
            },
            _ => {},
        }
        Ok(())
    }

    fn in_departure_time(&self) -> bool {
        self.current_time.is_some() && self.on_path == self.stack.len()
    }

    fn push_text(&mut self, text: &str) {
        if let Some(time) = self.current_time.as_mut() {
            time.push_str(text);
        }
    }

    fn finish(self) -> Result<Vec<FeedDeparture>, DepartureFeedError> {
        if !self.stack.is_empty() {
            return Err(DepartureFeedError::ParseError(format!(
                "document ended with {} unclosed element(s)",
                self.stack.len()
            )));
        }
        if !self.seen_root {
            return Err(DepartureFeedError::ParseError(
                "document has no root element".to_string(),
            ));
        }
        Ok(self.departures)
    }
}

/// Value of the element's `name` attribute, in any letter case
fn name_attribute(element: &BytesStart<'_>) -> Result<Option<String>, DepartureFeedError> {
    for attr in element.attributes() {
        let attr = attr.map_err(parse_error)?;
        if attr.key.local_name().as_ref().eq_ignore_ascii_case(b"name") {
            let value = attr.unescape_value().map_err(parse_error)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
