use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use adclick_cli::{run, Args};
use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;

const SITES: [&str; 4] = ["1fbe01fe", "85f751fd", "d9750ee7", "5b08c53b"];

fn train_csv(rows: usize) -> String {
    let mut csv = String::from("id,click,hour,C1,banner_pos,site_id\n");
    for t in 0..rows {
        let site = t % SITES.len();
        let click = site == 1 || (site == 2 && t % 3 == 0);
        csv.push_str(&format!(
            "{},{},141021{:02},1005,{},{}\n",
            1000 + t,
            click as u8,
            t % 24,
            t % 2,
            SITES[site]
        ));
    }
    csv
}

fn test_csv(rows: usize) -> String {
    let mut csv = String::from("id,hour,C1,banner_pos,site_id\n");
    for t in 0..rows {
        csv.push_str(&format!(
            "{},141031{:02},1005,0,{}\n",
            9000 + t,
            t % 24,
            SITES[t % SITES.len()]
        ));
    }
    csv
}

fn write_gz(path: &Path, content: &str) {
    let mut encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

fn setup(dir: &TempDir) -> Args {
    let train = dir.path().join("train.gz");
    let test = dir.path().join("test.csv");
    let grid = dir.path().join("grid.json");
    write_gz(&train, &train_csv(600));
    fs::write(&test, test_csv(40)).unwrap();
    fs::write(
        &grid,
        r#"{"alpha": [0.05, 0.5], "beta": [1.0], "lambda1": [0.0, 1000.0], "lambda2": [0.0, 1.0]}"#,
    )
    .unwrap();

    Args {
        train,
        test,
        submission: dir.path().join("submission.csv"),
        holdout: 10,
        bits: 12,
        jobs: 1,
        grid: Some(grid),
    }
}

#[test]
fn grid_search_and_submission() {
    let dir = TempDir::new().unwrap();
    let args = setup(&dir);
    let result = run(&args).unwrap();

    assert_eq!(result.trials.len(), 8);
    let min = result
        .trials
        .iter()
        .map(|t| t.log_loss)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(result.best.log_loss, min);
    assert!(result.trials.iter().all(|t| t.holdout_examples == 60));
    assert_eq!(result.best.lambda1, 0.0);
    assert!(result.best.log_loss < std::f64::consts::LN_2);

    let submission = fs::read_to_string(&args.submission).unwrap();
    let mut lines = submission.lines();
    assert_eq!(lines.next(), Some("id,click"));
    let rows: Vec<_> = lines.collect();
    assert_eq!(rows.len(), 40);
    for (t, row) in rows.iter().enumerate() {
        let mut cols = row.split(',');
        assert_eq!(cols.next().unwrap(), (9000 + t).to_string());
        let p: f64 = cols.next().unwrap().parse().unwrap();
        assert!(p > 0.0 && p < 1.0);
        assert!(cols.next().is_none());
    }

    // site 1 always clicks, site 0 never does
    let p = |row: &str| row.split(',').nth(1).unwrap().parse::<f64>().unwrap();
    assert!(p(rows[1]) > p(rows[0]));
}

#[test]
fn parallel_run_matches_sequential() {
    let dir = TempDir::new().unwrap();
    let args = setup(&dir);
    let sequential = run(&args).unwrap();
    let sequential_submission = fs::read_to_string(&args.submission).unwrap();

    let parallel_args = Args {
        jobs: 4,
        submission: dir.path().join("parallel.csv"),
        ..args
    };
    let parallel = run(&parallel_args).unwrap();

    assert_eq!(parallel.best.index, sequential.best.index);
    assert_eq!(parallel.best.log_loss, sequential.best.log_loss);
    assert_eq!(parallel.model, sequential.model);
    assert_eq!(
        fs::read_to_string(&parallel_args.submission).unwrap(),
        sequential_submission
    );
}

#[test]
fn missing_training_file() {
    let dir = TempDir::new().unwrap();
    let args = Args {
        train: dir.path().join("missing.gz"),
        ..setup(&dir)
    };
    assert!(run(&args).is_err());
    assert!(!args.submission.exists());
}
