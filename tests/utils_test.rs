use std::num::NonZeroUsize;

use chrono::NaiveDate;
use sparchive::utils::*;

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn chunked(items: &[i32], n: usize) -> Vec<Vec<i32>> {
    chunk(items, size(n)).map(|c| c.to_vec()).collect()
}

#[test]
fn test_chunk_splits_into_groups() {
    assert_eq!(
        chunked(&[1, 2, 3, 4, 5], 2),
        vec![vec![1, 2], vec![3, 4], vec![5]]
    );
    assert_eq!(chunked(&[1, 2, 3, 4, 5], 3), vec![vec![1, 2, 3], vec![4, 5]]);
    assert_eq!(chunked(&[1, 2, 3, 4, 5], 4), vec![vec![1, 2, 3, 4], vec![5]]);
}

#[test]
fn test_chunk_larger_than_input() {
    for n in 5..=10 {
        assert_eq!(chunked(&[1, 2, 3, 4, 5], n), vec![vec![1, 2, 3, 4, 5]]);
    }
}

#[test]
fn test_chunk_empty_input_yields_no_chunks() {
    for n in [1, 2, 100] {
        assert!(chunked(&[], n).is_empty());
    }
}

#[test]
fn test_chunk_concatenation_reproduces_input() {
    let items: Vec<i32> = (0..257).collect();
    for n in [1, 7, 100, 256, 257, 300] {
        let chunks = chunked(&items, n);

        let flattened: Vec<i32> = chunks.iter().flatten().copied().collect();
        assert_eq!(flattened, items);

        // all but the last chunk are full
        let (last, rest) = chunks.split_last().unwrap();
        assert!(rest.iter().all(|c| c.len() == n));
        assert!(!last.is_empty() && last.len() <= n);
    }
}

#[test]
fn test_chunk_is_restartable() {
    let items = [1, 2, 3];
    let chunks = chunk(&items, size(2));
    let first: Vec<_> = chunks.clone().collect();
    let second: Vec<_> = chunks.collect();
    assert_eq!(first, second);
}

#[test]
fn test_playlist_description() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

    assert_eq!(
        playlist_description(1, date),
        "This playlist is continuously updated by sparchive. Recently added: 1 track (09.03.2024)."
    );
    assert_eq!(
        playlist_description(12, date),
        "This playlist is continuously updated by sparchive. Recently added: 12 tracks (09.03.2024)."
    );
}

#[test]
fn test_snapshot_playlist_name() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

    assert_eq!(
        snapshot_playlist_name("Discovered Week {date}", date),
        "Discovered Week 2024-03-09"
    );
    assert_eq!(snapshot_playlist_name("Static name", date), "Static name");
}

#[test]
fn test_log_timestamp_format() {
    let stamp = log_timestamp();
    assert_eq!(stamp.len(), "2024-03-09 12:00:00".len());
    assert!(chrono::NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M:%S").is_ok());
}
