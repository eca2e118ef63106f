//! Algorithm selectors and their descriptions.
//!
//! Selectors parse from their short names. Any unrecognized name falls back
//! to the family default (bubble sort, Dijkstra) instead of failing, which
//! keeps stale stored preferences usable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Descriptive text shown next to an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub title: &'static str,
    pub complexity: &'static str,
    pub description: &'static str,
}

/// Which kind of visualization is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlgorithmFamily {
    #[default]
    Sorting,
    Pathfinding,
}

impl AlgorithmFamily {
    pub fn from_name(name: &str) -> Self {
        match name {
            "pathfinding" => Self::Pathfinding,
            _ => Self::Sorting,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sorting => "sorting",
            Self::Pathfinding => "pathfinding",
        }
    }
}

/// The five sorting adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortAlgorithm {
    #[default]
    Bubble,
    Selection,
    Insertion,
    Quick,
    Merge,
}

impl SortAlgorithm {
    pub const ALL: [Self; 5] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Quick,
        Self::Merge,
    ];

    /// Parse a short name, falling back to bubble sort.
    pub fn from_name(name: &str) -> Self {
        match name {
            "selection" => Self::Selection,
            "insertion" => Self::Insertion,
            "quick" => Self::Quick,
            "merge" => Self::Merge,
            _ => Self::Bubble,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
            Self::Quick => "quick",
            Self::Merge => "merge",
        }
    }

    pub fn info(self) -> AlgorithmInfo {
        match self {
            Self::Bubble => AlgorithmInfo {
                title: "Bubble Sort",
                complexity: "Time: O(n²) | Space: O(1)",
                description: "Repeatedly steps through the list, compares adjacent elements and swaps them if they're in the wrong order. Simple but inefficient for large lists.",
            },
            Self::Selection => AlgorithmInfo {
                title: "Selection Sort",
                complexity: "Time: O(n²) | Space: O(1)",
                description: "Finds the minimum element of the unsorted portion and places it at the beginning. Makes only O(n) swaps.",
            },
            Self::Insertion => AlgorithmInfo {
                title: "Insertion Sort",
                complexity: "Time: O(n²) | Space: O(1)",
                description: "Builds the sorted array one item at a time by inserting each element into the already sorted portion. Fast on small or nearly sorted data.",
            },
            Self::Quick => AlgorithmInfo {
                title: "Quick Sort",
                complexity: "Time: O(n log n) avg, O(n²) worst | Space: O(log n)",
                description: "Partitions the array around a pivot element and recursively sorts the sub-arrays.",
            },
            Self::Merge => AlgorithmInfo {
                title: "Merge Sort",
                complexity: "Time: O(n log n) | Space: O(n)",
                description: "Divides the array into halves, sorts them separately, then merges them back together. Stable, with guaranteed O(n log n) performance.",
            },
        }
    }
}

/// The four pathfinding adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PathAlgorithm {
    #[default]
    Dijkstra,
    Astar,
    Bfs,
    Dfs,
}

impl PathAlgorithm {
    pub const ALL: [Self; 4] = [Self::Dijkstra, Self::Astar, Self::Bfs, Self::Dfs];

    /// Parse a short name, falling back to Dijkstra.
    pub fn from_name(name: &str) -> Self {
        match name {
            "astar" => Self::Astar,
            "bfs" => Self::Bfs,
            "dfs" => Self::Dfs,
            _ => Self::Dijkstra,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dijkstra => "dijkstra",
            Self::Astar => "astar",
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
        }
    }

    pub fn info(self) -> AlgorithmInfo {
        match self {
            Self::Dijkstra => AlgorithmInfo {
                title: "Dijkstra's Algorithm",
                complexity: "Time: O((V+E) log V) | Space: O(V)",
                description: "Finds the shortest path from a start node to every other node in a graph with non-negative weights.",
            },
            Self::Astar => AlgorithmInfo {
                title: "A* Algorithm",
                complexity: "Time: O(E) | Space: O(V)",
                description: "Uses a heuristic to prioritize paths that appear to lead closer to the goal, finding shortest paths with fewer visits than Dijkstra's.",
            },
            Self::Bfs => AlgorithmInfo {
                title: "Breadth-First Search",
                complexity: "Time: O(V+E) | Space: O(V)",
                description: "Explores all neighbors at the present depth before moving to the next level. Guarantees shortest paths in unweighted graphs.",
            },
            Self::Dfs => AlgorithmInfo {
                title: "Depth-First Search",
                complexity: "Time: O(V+E) | Space: O(V)",
                description: "Explores as far as possible along each branch before backtracking. Finds a path, not necessarily the shortest one.",
            },
        }
    }
}

macro_rules! name_conversions {
    ($($ty:ty),*) => {$(
        impl From<String> for $ty {
            fn from(name: String) -> Self {
                Self::from_name(&name)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.name().to_string()
            }
        }

        impl FromStr for $ty {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from_name(s))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    )*};
}

name_conversions!(AlgorithmFamily, SortAlgorithm, PathAlgorithm);
