//! 통계 및 유틸리티 모듈
//!
//! 병합 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// 처리 통계 구조체
///
/// 병렬 처리 중 여러 스레드에서 동시에 갱신되므로 카운터는 모두 원자 타입입니다.
#[derive(Debug, Default)]
pub struct Statistics {
    /// 총 파일 수
    pub total_files: usize,
    /// 성공 처리 수
    pub success_count: AtomicUsize,
    /// 에러 발생 수
    pub error_count: AtomicUsize,
    /// 읽은 feature 수
    pub feature_count: AtomicUsize,
    /// 추출한 좌표 항목 수
    pub coordinate_count: AtomicUsize,
    /// 읽은 총 바이트
    pub total_bytes_read: AtomicU64,
    /// 쓴 총 바이트
    pub total_bytes_written: AtomicU64,
    start_time: Option<Instant>,
}

impl Statistics {
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub fn increment_success(&self) {
        self.success_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_error(&self) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
    }

    /// feature 수와 좌표 항목 수 추가
    pub fn add_features(&self, features: usize, coordinates: usize) {
        self.feature_count.fetch_add(features, Ordering::Relaxed);
        self.coordinate_count
            .fetch_add(coordinates, Ordering::Relaxed);
    }

    pub fn add_bytes_read(&self, bytes: u64) {
        self.total_bytes_read.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn add_bytes_written(&self, bytes: u64) {
        self.total_bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn get_success_count(&self) -> usize {
        self.success_count.load(Ordering::Relaxed)
    }

    pub fn get_error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    pub fn get_feature_count(&self) -> usize {
        self.feature_count.load(Ordering::Relaxed)
    }

    pub fn get_coordinate_count(&self) -> usize {
        self.coordinate_count.load(Ordering::Relaxed)
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 병합 통계 요약 출력
    pub fn print_summary(&self) {
        let bytes_read = self.total_bytes_read.load(Ordering::Relaxed);
        let bytes_written = self.total_bytes_written.load(Ordering::Relaxed);

        print_rule();
        println!("{}", " 📊 병합 통계".bright_white().bold());
        print_rule();

        println!(
            "  {} 입력 파일:    {}",
            "📁".bright_cyan(),
            self.total_files
        );
        println!(
            "  {} Feature:      {}",
            "🧭".bright_green(),
            self.get_feature_count().to_string().green()
        );
        println!(
            "  {} 좌표 항목:    {}",
            "📍".bright_green(),
            self.get_coordinate_count().to_string().green()
        );
        println!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(bytes_read)
        );
        println!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(bytes_written)
        );
        println!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        print_rule();
    }

    /// 구조 검사 통계 요약 출력
    pub fn print_validation_summary(&self) {
        let success = self.get_success_count();
        let failed = self.get_error_count();

        print_rule();
        println!("{}", " 🔍 구조 검사 결과".bright_white().bold());
        print_rule();

        println!(
            "  {} 전체 파일:    {}",
            "📁".bright_cyan(),
            self.total_files
        );
        println!(
            "  {} 유효:         {}",
            "✅".bright_green(),
            success.to_string().green()
        );

        if failed > 0 {
            println!(
                "  {} 무효:         {}",
                "❌".bright_red(),
                failed.to_string().red()
            );
        } else {
            println!("  {} 무효:         {}", "✅".bright_green(), "0".green());
        }

        if self.total_files > 0 {
            let valid_rate = (success as f64 / self.total_files as f64) * 100.0;
            println!("  {} 유효율:       {:.1}%", "📈".bright_white(), valid_rate);
        }

        println!(
            "  {} 검사 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        print_rule();
    }
}

fn print_rule() {
    println!("{}", "═".repeat(50).bright_blue());
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use geomerge::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        format!("{}시간 {}분", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}분 {}초", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
