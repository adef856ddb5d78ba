//! geomerge - GEOJSON FOLDER MERGER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use geomerge::{
    cli::Args,
    error::{FileFailure, GeoMergeError},
    merge_into,
    pattern::PatternMatcher,
    processor::{process_files, FileOutcome, MergeOptions},
    scanner::{scan_directory, validate_input},
    stats::Statistics,
};

fn main() -> Result<()> {
    let args = Args::parse();

    // 스레드 풀 설정
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("스레드 풀 초기화 실패")?;
    }

    validate_input(&args.path)?;

    print_header(&args);

    let pattern_matcher = PatternMatcher::new(args.pattern.clone())?;

    let files = scan_directory(&args.path, &pattern_matcher)?;

    println!(
        "  {} 발견된 파일 수: {}",
        "📋".bright_white(),
        files.len().to_string().bright_green()
    );

    if args.dry_run {
        print_dry_run(&files);
        return Ok(());
    }

    let stats = Statistics::new(files.len());

    if args.validate_only {
        return run_validation_mode(&args, files, &stats);
    }

    run_merge_mode(&args, files, &stats)
}

/// 헤더 출력
fn print_header(args: &Args) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 🗺️  GEOJSON FOLDER MERGER".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 폴더: {:?}", "📂".bright_cyan(), args.path);

    if !args.validate_only {
        println!("  {} 출력 파일: {:?}", "📄".bright_green(), args.output());
    }

    if let Some(ref pattern) = args.pattern {
        println!("  {} 패턴 필터: {}", "🔍".bright_magenta(), pattern);
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 병합 없음)".yellow()
        );
    }

    if args.validate_only {
        println!("  {} {}", "🔍".bright_cyan(), "구조 검사 모드".cyan());
    }

    if args.pretty {
        println!(
            "  {} {}",
            "✨".bright_magenta(),
            "Pretty 출력 모드".magenta()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
    println!("\n{}", "📁 파일 검색 중...".bright_cyan());
}

/// 드라이런 출력
fn print_dry_run(files: &[PathBuf]) {
    println!("\n{}", "📋 병합 순서:".bright_cyan());
    for (i, path) in files.iter().enumerate() {
        println!("  {}. {:?}", i + 1, path.file_name().unwrap_or_default());
    }
    println!(
        "\n{} 총 {} 개의 파일이 병합될 예정입니다.",
        "ℹ️".bright_blue(),
        files.len().to_string().bright_green()
    );
}

/// 파일 하나의 처리 결과를 통계와 화면에 반영
fn record_outcome(outcome: &FileOutcome, stats: &Statistics, verbose: bool) {
    stats.add_bytes_read(outcome.file_size);

    match &outcome.result {
        Ok(contribution) => {
            stats.increment_success();
            stats.add_features(contribution.feature_count, contribution.coordinates.len());

            if verbose {
                println!(
                    "  {} {:?} ({} features)",
                    "✓".green(),
                    outcome.path.file_name().unwrap_or_default(),
                    contribution.feature_count
                );
            }
        }
        Err(_) => stats.increment_error(),
    }
}

/// 구조 검사 모드 실행
fn run_validation_mode(args: &Args, files: Vec<PathBuf>, stats: &Statistics) -> Result<()> {
    let pb = create_progress_bar(files.len());

    println!("\n{}", "🔍 구조 검사 중...".bright_cyan());

    let outcomes = process_files(files, &MergeOptions::new(), |outcome| {
        record_outcome(outcome, stats, args.verbose);
        pb.inc(1);
    });

    pb.finish_with_message("완료!");

    let failures: Vec<FileFailure> = outcomes
        .iter()
        .filter_map(|outcome| {
            outcome.error_message().map(|reason| FileFailure {
                path: outcome.path.clone(),
                reason,
            })
        })
        .collect();

    print_errors(&failures, args.verbose);

    if let Some(ref log_path) = args.log {
        write_error_log(log_path, &failures)?;
    }

    stats.print_validation_summary();

    if failures.is_empty() {
        println!("\n{} 모든 파일이 유효합니다!\n", "✅".bright_green());
        Ok(())
    } else {
        anyhow::bail!("{} 개의 파일에 오류가 있습니다", failures.len())
    }
}

/// 병합 모드 실행
fn run_merge_mode(args: &Args, files: Vec<PathBuf>, stats: &Statistics) -> Result<()> {
    let output = args.output();

    if files.is_empty() {
        println!(
            "{}",
            "⚠️ 병합할 파일이 없습니다. 빈 MultiLineString이 저장됩니다.".yellow()
        );
    }

    let pb = create_progress_bar(files.len());

    println!("\n{}", "⚡ 병렬 처리 중...".bright_cyan());

    let options = MergeOptions::new().with_pretty(args.pretty);
    let result = merge_into(files, &output, &options, |outcome| {
        record_outcome(outcome, stats, args.verbose);
        pb.inc(1);
    });

    let merged = match result {
        Ok(merged) => {
            pb.finish_with_message("완료!");
            merged
        }
        Err(GeoMergeError::InvalidInputs { failures }) => {
            pb.abandon();
            print_errors(&failures, true);
            if let Some(ref log_path) = args.log {
                write_error_log(log_path, &failures)?;
            }
            anyhow::bail!(
                "{} 개의 입력 파일을 처리할 수 없어 {:?} 을(를) 생성하지 않았습니다",
                failures.len(),
                output
            );
        }
        Err(e) => {
            pb.abandon();
            return Err(e.into());
        }
    };

    stats.add_bytes_written(merged.bytes_written);

    stats.print_summary();

    println!(
        "\n{} 저장 완료: {:?} ({} 개 파일, {} 개 좌표 항목)\n",
        "✅".bright_green(),
        output,
        merged.file_count,
        merged.coordinates.len()
    );

    Ok(())
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

/// 에러 목록 출력
fn print_errors(failures: &[FileFailure], verbose: bool) {
    if failures.is_empty() {
        return;
    }

    eprintln!("\n{}", "❌ 오류 발생 파일:".bright_red());
    for failure in failures {
        eprintln!(
            "  {} {:?}",
            "•".red(),
            failure.path.file_name().unwrap_or_default()
        );
        if verbose {
            eprintln!("    {}", failure.reason.dimmed());
        }
    }
}

/// 에러 로그 파일 작성
fn write_error_log(log_path: &Path, failures: &[FileFailure]) -> Result<()> {
    let mut log_file = File::create(log_path)
        .with_context(|| format!("에러 로그 파일을 만들 수 없습니다: {:?}", log_path))?;

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    writeln!(log_file, "geomerge 에러 로그")?;
    writeln!(log_file, "생성 시간: Unix timestamp: {}", timestamp)?;
    writeln!(log_file, "총 에러 수: {}", failures.len())?;
    writeln!(log_file, "{}", "=".repeat(50))?;

    for failure in failures {
        writeln!(log_file, "\n파일: {:?}", failure.path)?;
        writeln!(log_file, "에러: {}", failure.reason)?;
    }

    println!("\n{} 에러 로그 저장: {:?}", "📝".bright_cyan(), log_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_error_log() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("errors.log");
        let failures = vec![FileFailure {
            path: PathBuf::from("broken.json"),
            reason: "필수 키 \"features\" 누락 (broken.json)".to_string(),
        }];

        write_error_log(&log_path, &failures).unwrap();
        let content = fs::read_to_string(&log_path).unwrap();

        assert!(content.contains("총 에러 수: 1"));
        assert!(content.contains("broken.json"));
        assert!(content.contains("features"));
    }

    #[test]
    fn test_record_outcome_counts() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.json");
        let bad = temp_dir.path().join("bad.json");
        fs::write(
            &good,
            r#"{"features":[{"geometry":{"coordinates":[[0,0],[1,1]]}}]}"#,
        )
        .unwrap();
        fs::write(&bad, r#"{"type":"FeatureCollection"}"#).unwrap();

        let stats = Statistics::new(2);
        let outcomes = process_files(vec![good, bad], &MergeOptions::new(), |outcome| {
            record_outcome(outcome, &stats, false)
        });

        assert_eq!(outcomes.len(), 2);
        assert_eq!(stats.get_success_count(), 1);
        assert_eq!(stats.get_error_count(), 1);
        assert_eq!(stats.get_feature_count(), 1);
        assert_eq!(stats.get_coordinate_count(), 2);
    }
}
