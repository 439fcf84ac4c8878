//! CSV readers for adjacency matrices and wrenchable-edge pools.
//!
//! An adjacency matrix has node names in the first row (the top-left cell is
//! ignored) and one row per node below it. A cell holding `1` marks an edge
//! between the row's node and the column's node; any other value means no edge.
//!
//! ```text
//! ,a1,a2,b1
//! a1,,1,
//! a2,1,,1
//! b1,,1,
//! ```

use std::{fs::File, io::Read, path::Path};

use itertools::Itertools;

use crate::{error::ImportError, graph::Graph, search::CandidatePool};

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// File line `record` starts on, counting from 1.
///
/// A record's position is taken before the reader skips empty lines, so those
/// are stepped over here.
fn line_of(input: &[u8], record: &csv::StringRecord) -> usize {
    let start = record.position().map_or(0, |p| p.byte() as usize).min(input.len());
    let skipped = input[start..]
        .iter()
        .take_while(|&&b| b == b'\n' || b == b'\r')
        .count();
    1 + input[..start + skipped].iter().filter(|&&b| b == b'\n').count()
}

/// Whitespace-only lines come back from the trimming reader as empty fields.
fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

/// Non-blank records of `input`, each with the file line it starts on.
fn records(input: &[u8]) -> impl Iterator<Item = csv::Result<(usize, csv::StringRecord)>> + '_ {
    csv_reader(input)
        .into_records()
        .filter_map(move |record| match record {
            Ok(record) if is_blank(&record) => None,
            Ok(record) => Some(Ok((line_of(input, &record), record))),
            Err(err) => Some(Err(err)),
        })
}

fn read_all<R: Read>(mut reader: R) -> Result<Vec<u8>, ImportError> {
    let mut input = vec![];
    reader.read_to_end(&mut input)?;
    Ok(input)
}

/// Builds a graph from an adjacency matrix. All named nodes are added before any edge.
pub fn import_adjacency_matrix<R: Read>(reader: R) -> Result<Graph, ImportError> {
    let input = read_all(reader)?;
    let mut rows = records(&input);

    let column_names = match rows.next() {
        Some(header) => header?.1.iter().map(String::from).collect_vec(),
        None => return Err(ImportError::Empty),
    };

    let mut graph = Graph::new();
    graph.add_nodes(&column_names.iter().filter(|name| !name.is_empty()).collect_vec());

    for record in rows {
        let (line, record) = record?;
        if record.len() != column_names.len() {
            return Err(ImportError::RowLength {
                line,
                expected: column_names.len(),
                found: record.len(),
            });
        }

        let node = &record[0];
        for (column, cell) in record.iter().enumerate().skip(1) {
            if cell != "1" {
                continue;
            }
            let neighbor = &column_names[column];
            if neighbor.is_empty() {
                return Err(ImportError::UnnamedColumn { line, column });
            }
            graph
                .add_edge(node, neighbor)
                .map_err(|source| ImportError::Lookup { line, source })?;
        }
    }

    log::debug!(
        "Imported adjacency matrix with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

pub fn import_adjacency_matrix_file(path: impl AsRef<Path>) -> Result<Graph, ImportError> {
    import_adjacency_matrix(File::open(path)?)
}

/// Reads a headerless `node,node,label` list into a pool, keeping row order.
pub fn import_candidate_pool<R: Read>(reader: R) -> Result<CandidatePool, ImportError> {
    let input = read_all(reader)?;
    let mut pool = CandidatePool::new();
    for record in records(&input) {
        let (line, record) = record?;
        if record.len() != 3 {
            return Err(ImportError::PoolRow {
                line,
                found: record.len(),
            });
        }
        pool.insert((&record[0], &record[1]), &record[2]);
    }
    Ok(pool)
}

pub fn import_candidate_pool_file(path: impl AsRef<Path>) -> Result<CandidatePool, ImportError> {
    import_candidate_pool(File::open(path)?)
}

#[cfg(test)]
mod test_import {
    use super::*;
    use crate::{error::GraphError, types::Edge};

    #[test]
    fn square_matrix() {
        let csv = ",A,B,C,D\n\
                   A,0,1,0,1\n\
                   B,1,0,1,0\n\
                   C,0,1,0,1\n\
                   D,1,0,1,0\n";
        let g = import_adjacency_matrix(csv.as_bytes()).unwrap();
        assert_eq!(g.nodes().collect_vec(), vec!["A", "B", "C", "D"]);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.neighbors("A").unwrap(), vec!["B", "D"]);
        assert!(g.path_exists("A", "C").unwrap());
    }

    #[test]
    fn only_literal_one_is_an_edge() {
        let csv = ",A,B,C\nA,,yes,1\nB,2,,\nC,1,true,\n";
        let g = import_adjacency_matrix(csv.as_bytes()).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert!(g.contains_edge("A", "C"));
        assert!(!g.contains_edge("A", "B"));
    }

    #[test]
    fn one_sided_marks_still_make_symmetric_edges() {
        let csv = ",A,B\nA,,1\nB,,\n";
        let g = import_adjacency_matrix(csv.as_bytes()).unwrap();
        assert_eq!(g.neighbors("B").unwrap(), vec!["A"]);
    }

    #[test]
    fn later_rows_may_reference_earlier_columns() {
        // every node is known before the first edge is added
        let csv = ",A,B,C\nC,1,,\nA,,,1\nB,,,\n";
        let g = import_adjacency_matrix(csv.as_bytes()).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.node_count(), 3);
    }

    #[test]
    fn empty_header_cells_are_not_nodes() {
        let csv = ",A,,B\nA,,,1\nB,1,,\n";
        let g = import_adjacency_matrix(csv.as_bytes()).unwrap();
        assert_eq!(g.node_count(), 2);
        assert!(g.contains_edge("A", "B"));
        assert!(!g.contains_node(""));
    }

    #[test]
    fn edge_in_unnamed_column_is_rejected() {
        let csv = ",A,,B\nA,,1,\n";
        assert!(matches!(
            import_adjacency_matrix(csv.as_bytes()),
            Err(ImportError::UnnamedColumn { line: 2, column: 2 })
        ));
    }

    #[test]
    fn short_row_is_rejected() {
        let csv = ",A,B,C\nA,,1,\nB,1\n";
        assert!(matches!(
            import_adjacency_matrix(csv.as_bytes()),
            Err(ImportError::RowLength {
                line: 3,
                expected: 4,
                found: 2
            })
        ));
    }

    #[test]
    fn long_row_is_rejected() {
        let csv = ",A,B\nA,,1,1\n";
        assert!(matches!(
            import_adjacency_matrix(csv.as_bytes()),
            Err(ImportError::RowLength { line: 2, .. })
        ));
    }

    #[test]
    fn unknown_row_node_is_a_lookup_error() {
        let csv = ",A,B\nA,,1\nZ,1,\n";
        match import_adjacency_matrix(csv.as_bytes()) {
            Err(ImportError::Lookup { line, source }) => {
                assert_eq!(line, 3);
                assert_eq!(source, GraphError::UnknownNode("Z".to_string()));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn blank_and_whitespace_lines_are_skipped() {
        let csv = ",A,B\n\nA,,1\n   \nB,,\n";
        let g = import_adjacency_matrix(csv.as_bytes()).unwrap();
        assert_eq!(g.node_count(), 2);
        assert!(g.contains_edge("A", "B"));
    }

    #[test]
    fn errors_report_file_lines_after_blank_lines() {
        let csv = ",A,B\n\nA,,1\n   \nB,1\n";
        assert!(matches!(
            import_adjacency_matrix(csv.as_bytes()),
            Err(ImportError::RowLength {
                line: 5,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn crlf_lines_are_counted_once() {
        let csv = ",A,B\r\n\r\nA,1\r\n";
        assert!(matches!(
            import_adjacency_matrix(csv.as_bytes()),
            Err(ImportError::RowLength { line: 3, .. })
        ));
    }

    #[test]
    fn cells_and_names_are_trimmed() {
        let csv = " , A , B \n A ,, 1 \nB,\t,\n";
        let g = import_adjacency_matrix(csv.as_bytes()).unwrap();
        assert_eq!(g.nodes().collect_vec(), vec!["A", "B"]);
        assert!(g.contains_edge("A", "B"));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            import_adjacency_matrix("".as_bytes()),
            Err(ImportError::Empty)
        ));
    }

    #[test]
    fn pool_keeps_row_order() {
        let csv = "c3,c1,c2\nb5,b1,b2\nd4,c4,d2\n";
        let pool = import_candidate_pool(csv.as_bytes()).unwrap();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.iter().map(|(_, l)| l).collect_vec(), vec!["c2", "b2", "d2"]);
        assert_eq!(pool.iter().next().unwrap().0, &Edge::new("c1", "c3"));
    }

    #[test]
    fn first_bad_pool_row_is_line_one() {
        assert!(matches!(
            import_candidate_pool("a,b\n".as_bytes()),
            Err(ImportError::PoolRow { line: 1, found: 2 })
        ));
    }

    #[test]
    fn pool_row_needs_three_fields() {
        let csv = "c3,c1,c2\nb5,b1\n";
        assert!(matches!(
            import_candidate_pool(csv.as_bytes()),
            Err(ImportError::PoolRow { line: 2, found: 2 })
        ));
    }
}
