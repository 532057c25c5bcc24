//! Binary (de)serialization for [`Graph`] and [`GraphAug`].
//!
//! The wire format is a little-endian magic number identifying which of the
//! two representations follows, then the adjacency slice, then the neighbor
//! slice, each length-prefixed as a `u64` element count.

use std::io::{self, Read, Write};

use super::{Adj, AugNb, Graph, GraphAug};

const MAGIC_ADJ: u64 = 0x0ad762af;
const MAGIC_ADJ_AUG: u64 = 0x0a8662af;

#[derive(Debug)]
pub enum IoError {
    /// The file's magic number didn't match the representation being read.
    Mismatch,
    /// The stream ended before a complete value could be read.
    Short,
    Io(io::Error),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoError::Mismatch => write!(f, "graph io: magic number mismatch"),
            IoError::Short => write!(f, "graph io: unexpected end of input"),
            IoError::Io(e) => write!(f, "graph io: {e}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<io::Error> for IoError {
    fn from(e: io::Error) -> Self {
        IoError::Io(e)
    }
}

fn read_exact_or_short<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), IoError> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(IoError::Short),
        Err(e) => Err(IoError::Io(e)),
    }
}

fn push_u32<W: Write>(writer: &mut W, v: u32) -> io::Result<()> {
    writer.write_all(&v.to_le_bytes())
}

fn pop_u32<R: Read>(reader: &mut R) -> Result<u32, IoError> {
    let mut buf = [0u8; 4];
    read_exact_or_short(reader, &mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn push_u64<W: Write>(writer: &mut W, v: u64) -> io::Result<()> {
    writer.write_all(&v.to_le_bytes())
}

fn pop_u64<R: Read>(reader: &mut R) -> Result<u64, IoError> {
    let mut buf = [0u8; 8];
    read_exact_or_short(reader, &mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn push_adj_slice<W: Write>(writer: &mut W, adj: &[Adj]) -> io::Result<()> {
    push_u64(writer, adj.len() as u64)?;
    for a in adj {
        push_u32(writer, a.index)?;
        push_u32(writer, a.len)?;
    }
    Ok(())
}

fn pop_adj_slice<R: Read>(reader: &mut R) -> Result<Vec<Adj>, IoError> {
    let len = pop_u64(reader)?;
    let mut adj = Vec::with_capacity(len as usize);
    for _ in 0..len {
        let index = pop_u32(reader)?;
        let a_len = pop_u32(reader)?;
        adj.push(Adj { index, len: a_len });
    }
    Ok(adj)
}

fn push_nb_slice<W: Write>(writer: &mut W, nb: &[u32]) -> io::Result<()> {
    push_u64(writer, nb.len() as u64)?;
    for &u in nb {
        push_u32(writer, u)?;
    }
    Ok(())
}

fn pop_nb_slice<R: Read>(reader: &mut R) -> Result<Vec<u32>, IoError> {
    let len = pop_u64(reader)?;
    let mut nb = Vec::with_capacity(len as usize);
    for _ in 0..len {
        nb.push(pop_u32(reader)?);
    }
    Ok(nb)
}

fn push_aug_nb_slice<W: Write>(writer: &mut W, nb: &[AugNb]) -> io::Result<()> {
    push_u64(writer, nb.len() as u64)?;
    for n in nb {
        push_u32(writer, n.vertex)?;
        push_u32(writer, n.back_index)?;
    }
    Ok(())
}

fn pop_aug_nb_slice<R: Read>(reader: &mut R) -> Result<Vec<AugNb>, IoError> {
    let len = pop_u64(reader)?;
    let mut nb = Vec::with_capacity(len as usize);
    for _ in 0..len {
        let vertex = pop_u32(reader)?;
        let back_index = pop_u32(reader)?;
        nb.push(AugNb { vertex, back_index });
    }
    Ok(nb)
}

pub fn push<W: Write>(writer: &mut W, graph: &Graph) -> io::Result<()> {
    push_u64(writer, MAGIC_ADJ)?;
    push_adj_slice(writer, &graph.adj)?;
    push_nb_slice(writer, &graph.nb)
}

pub fn pop<R: Read>(reader: &mut R) -> Result<Graph, IoError> {
    let magic = pop_u64(reader)?;
    if magic != MAGIC_ADJ {
        return Err(IoError::Mismatch);
    }
    let adj = pop_adj_slice(reader)?;
    let nb = pop_nb_slice(reader)?;
    Ok(Graph { adj, nb })
}

pub fn aug_push<W: Write>(writer: &mut W, graph: &GraphAug) -> io::Result<()> {
    push_u64(writer, MAGIC_ADJ_AUG)?;
    push_adj_slice(writer, &graph.adj)?;
    push_aug_nb_slice(writer, &graph.nb)
}

pub fn aug_pop<R: Read>(reader: &mut R) -> Result<GraphAug, IoError> {
    let magic = pop_u64(reader)?;
    if magic != MAGIC_ADJ_AUG {
        return Err(IoError::Mismatch);
    }
    let adj = pop_adj_slice(reader)?;
    let nb = pop_aug_nb_slice(reader)?;
    Ok(GraphAug { adj, nb })
}

/// Bounds-check a freshly deserialized [`Graph`]: every neighbor slot must
/// fall inside `nb`, and every neighbor id must be a valid vertex.
pub fn validate(graph: &Graph) -> bool {
    for v in 0..graph.adj.len() as u32 {
        let v_adj = graph.adj[v as usize];
        for i in 0..v_adj.len {
            if (v_adj.index + i) as usize >= graph.nb.len() {
                return false;
            }
            let u = graph.nb[(v_adj.index + i) as usize];
            if u >= graph.adj.len() as u32 {
                return false;
            }
        }
    }
    true
}

/// Bounds- and back-index-check a freshly deserialized [`GraphAug`].
pub fn aug_validate(graph: &GraphAug) -> bool {
    for v in 0..graph.adj.len() as u32 {
        let v_adj = graph.adj[v as usize];
        for i in 0..v_adj.len {
            if (v_adj.index + i) as usize >= graph.nb.len() {
                return false;
            }
            let vu = graph.nb[(v_adj.index + i) as usize];
            if vu.vertex >= graph.adj.len() as u32 {
                return false;
            }
            let u_adj = graph.adj[vu.vertex as usize];
            if (u_adj.index + vu.back_index) as usize >= graph.nb.len() {
                return false;
            }
            let uv = graph.nb[(u_adj.index + vu.back_index) as usize];
            if uv.vertex != v {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::build;
    use crate::graph::plane::gen;

    #[test]
    fn round_trips_a_plain_graph() {
        let g = gen::complete(19);
        let mut buf = Vec::new();
        push(&mut buf, &g).unwrap();

        let mut cursor = &buf[..];
        let g2 = pop(&mut cursor).unwrap();
        assert!(validate(&g2));
        assert_eq!(g.adj, g2.adj);
        assert_eq!(g.nb, g2.nb);
    }

    #[test]
    fn round_trips_an_augmented_graph() {
        let g = build::augment(&gen::grid(4, 4));
        let mut buf = Vec::new();
        aug_push(&mut buf, &g).unwrap();

        let mut cursor = &buf[..];
        let g2 = aug_pop(&mut cursor).unwrap();
        assert!(aug_validate(&g2));
        assert_eq!(g.adj, g2.adj);
        assert_eq!(
            g.nb.iter().map(|n| (n.vertex, n.back_index)).collect::<Vec<_>>(),
            g2.nb.iter().map(|n| (n.vertex, n.back_index)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn mismatched_magic_is_rejected() {
        let g = gen::complete(3);
        let mut buf = Vec::new();
        push(&mut buf, &g).unwrap();

        let mut cursor = &buf[..];
        let err = aug_pop(&mut cursor).unwrap_err();
        assert!(matches!(err, IoError::Mismatch));
    }

    #[test]
    fn truncated_input_is_rejected() {
        let g = gen::complete(5);
        let mut buf = Vec::new();
        push(&mut buf, &g).unwrap();
        buf.truncate(buf.len() - 2);

        let mut cursor = &buf[..];
        let err = pop(&mut cursor).unwrap_err();
        assert!(matches!(err, IoError::Short));
    }

    #[test]
    fn validate_rejects_out_of_range_neighbor() {
        let mut g = gen::complete(3);
        g.nb[0] = 99;
        assert!(!validate(&g));
    }
}
