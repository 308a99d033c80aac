//! The two todo queues.

use std::fmt;
use std::str::FromStr;

/// One of the two named task sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Queue {
    /// Things to do today. Only this queue supports marking tasks done.
    Today,
    /// Things to get around to eventually.
    Later,
}

impl Queue {
    pub const ALL: [Queue; 2] = [Queue::Today, Queue::Later];

    pub fn as_str(&self) -> &'static str {
        match self {
            Queue::Today => "today",
            Queue::Later => "later",
        }
    }

    /// Heading used when listing the queue.
    pub fn title(&self) -> &'static str {
        match self {
            Queue::Today => "To Do Today",
            Queue::Later => "Things to Get Around To",
        }
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Queue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(Queue::Today),
            "later" => Ok(Queue::Later),
            other => Err(format!("Unknown queue '{}'. Expected 'today' or 'later'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Today".parse::<Queue>(), Ok(Queue::Today));
        assert_eq!(" LATER ".parse::<Queue>(), Ok(Queue::Later));
    }

    #[test]
    fn test_parse_rejects_unknown_queue() {
        let err = "someday".parse::<Queue>().unwrap_err();
        assert!(err.contains("someday"));
    }

    #[test]
    fn test_display_matches_parse() {
        for queue in Queue::ALL {
            assert_eq!(queue.to_string().parse::<Queue>(), Ok(queue));
        }
    }
}
