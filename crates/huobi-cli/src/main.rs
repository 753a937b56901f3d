//! Huobi Spot REST CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 호가 조회 (공개 API)
//! huobi depth -s btcusdt --depth 5
//!
//! # 캔들 조회
//! huobi klines -s btcusdt -p 1day --size 30
//!
//! # 지정가 매수 (HUOBI_ACCESS_KEY / HUOBI_SECRET_KEY 필요)
//! huobi place-order --account-id 100009 -s btcusdt -t buy-limit --amount 0.001 --price 30000
//!
//! # 현물 → 선물 이체
//! huobi transfer --currency btc --amount 0.5 --direction pro-to-futures
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use huobi_core::{init_logging, ClientConfig, LogConfig, LogFormat};
use huobi_rest::{
    DepthStep, Direct, KlinePeriod, OrderSource, OrderState, OrderType, Side, StopOperator,
    TransferDirection,
};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "huobi")]
#[command(about = "Huobi Spot REST API 클라이언트", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (없으면 환경 변수만 사용)
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    config: String,

    /// API 호스트 (설정 파일/환경 변수보다 우선)
    #[arg(long, global = true)]
    host: Option<String>,

    /// 로그 레벨 필터
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true, default_value = "pretty")]
    log_format: LogFormat,

    /// 요청별 span 시작/종료 기록 (요청 소요 시간 확인)
    #[arg(long, global = true)]
    log_span_events: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// 호가창 조회
    Depth {
        /// 거래 심볼 (예: btcusdt)
        #[arg(short, long)]
        symbol: String,

        /// 병합 단계 (step0-step5)
        #[arg(long, default_value = "step0")]
        step: DepthStep,

        /// 호가 깊이 (5, 10, 20)
        #[arg(long)]
        depth: Option<u32>,
    },

    /// 캔들 조회
    Klines {
        #[arg(short, long)]
        symbol: String,

        /// 주기 (1min, 5min, 15min, 30min, 60min, 4hour, 1day, 1mon, 1week, 1year)
        #[arg(short, long)]
        period: KlinePeriod,

        /// 조회 개수 (1-2000)
        #[arg(long)]
        size: Option<u32>,
    },

    /// ETP 순자산가치 조회
    EtpNav {
        #[arg(short, long)]
        symbol: String,
    },

    /// ETP 기준 정보 조회
    EtpReference {
        /// ETP 이름 (없으면 전체)
        #[arg(long)]
        etp_name: Option<String>,
    },

    /// 주문 생성
    PlaceOrder {
        #[arg(long)]
        account_id: String,

        #[arg(short, long)]
        symbol: String,

        /// 주문 유형 (예: buy-limit, sell-market)
        #[arg(short = 't', long)]
        order_type: OrderType,

        #[arg(long)]
        amount: Decimal,

        #[arg(long)]
        price: Option<Decimal>,

        #[arg(long, default_value = "spot-api")]
        source: OrderSource,

        #[arg(long)]
        client_order_id: Option<String>,

        /// 스탑 가격 (스탑 주문 전용)
        #[arg(long, requires = "operator")]
        stop_price: Option<Decimal>,

        /// 스탑 조건 (gte, lte)
        #[arg(long, requires = "stop_price")]
        operator: Option<StopOperator>,
    },

    /// 주문 취소
    CancelOrder {
        #[arg(long, conflicts_with = "client_order_id", required_unless_present = "client_order_id")]
        order_id: Option<String>,

        #[arg(long)]
        client_order_id: Option<String>,
    },

    /// 미체결 주문 조회
    OpenOrders {
        #[arg(long)]
        account_id: String,

        #[arg(short, long)]
        symbol: String,

        #[arg(long)]
        side: Option<Side>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        direct: Option<Direct>,

        #[arg(long, default_value = "100")]
        size: u32,
    },

    /// 과거 주문 조회
    HistoryOrders {
        #[arg(short, long)]
        symbol: String,

        /// 주문 상태 (쉼표로 구분, 예: filled,canceled)
        #[arg(long, value_delimiter = ',', required = true)]
        states: Vec<OrderState>,

        /// 주문 유형 필터 (쉼표로 구분)
        #[arg(long, value_delimiter = ',')]
        types: Vec<OrderType>,

        /// 시작 날짜 (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,

        /// 종료 날짜 (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,

        #[arg(long)]
        size: Option<u32>,
    },

    /// 현물/선물 계좌 이체
    Transfer {
        #[arg(long)]
        currency: String,

        #[arg(long)]
        amount: Decimal,

        /// 이체 방향 (pro-to-futures, futures-to-pro)
        #[arg(long)]
        direction: TransferDirection,
    },
}

impl Cli {
    fn log_config(&self) -> LogConfig {
        LogConfig::new(self.log_level.clone())
            .with_format(self.log_format)
            .with_span_events(self.log_span_events)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일이 있으면 로드
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(cli.log_config())
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    let mut config = ClientConfig::load(&cli.config)
        .with_context(|| format!("설정 로드 실패: {}", cli.config))?;
    if let Some(host) = cli.host {
        config.host = host;
    }

    let envelope = commands::run(config, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(envelope.as_value())?);

    Ok(())
}
