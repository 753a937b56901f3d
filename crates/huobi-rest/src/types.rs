//! 거래소 와이어 열거형.
//!
//! 모든 값은 Huobi가 사용하는 문자열 그대로 직렬화됩니다.

use huobi_core::HuobiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 와이어 문자열과 1:1로 대응하는 열거형 정의.
///
/// `as_str`, `Display`, `FromStr`, serde 구현을 함께 생성합니다.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// 가능한 모든 값.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// 와이어 문자열.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = HuobiError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    _ => Err(HuobiError::InvalidRequest(format!(
                        "unknown {}: {}",
                        stringify!($name),
                        s
                    ))),
                }
            }
        }
    };
}

wire_enum! {
    /// 주문 방향.
    Side {
        Buy => "buy",
        Sell => "sell",
    }
}

wire_enum! {
    /// 현물 주문 유형.
    OrderType {
        BuyMarket => "buy-market",
        SellMarket => "sell-market",
        BuyLimit => "buy-limit",
        SellLimit => "sell-limit",
        BuyIoc => "buy-ioc",
        SellIoc => "sell-ioc",
        BuyLimitMaker => "buy-limit-maker",
        SellLimitMaker => "sell-limit-maker",
        BuyStopLimit => "buy-stop-limit",
        SellStopLimit => "sell-stop-limit",
        BuyLimitFok => "buy-limit-fok",
        SellLimitFok => "sell-limit-fok",
        BuyStopLimitFok => "buy-stop-limit-fok",
        SellStopLimitFok => "sell-stop-limit-fok",
    }
}

impl OrderType {
    /// 주문 방향.
    pub fn side(&self) -> Side {
        if self.as_str().starts_with("buy") {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    /// 시장가 주문 여부 (가격 없음).
    pub fn is_market(&self) -> bool {
        matches!(self, OrderType::BuyMarket | OrderType::SellMarket)
    }

    /// 스탑 주문 여부 (`stop-price`와 `operator` 필요).
    pub fn is_stop(&self) -> bool {
        matches!(
            self,
            OrderType::BuyStopLimit
                | OrderType::SellStopLimit
                | OrderType::BuyStopLimitFok
                | OrderType::SellStopLimitFok
        )
    }
}

wire_enum! {
    /// 주문 출처.
    #[derive(Default)]
    OrderSource {
        #[default]
        SpotApi => "spot-api",
        MarginApi => "margin-api",
        SuperMarginApi => "super-margin-api",
        C2cMarginApi => "c2c-margin-api",
    }
}

wire_enum! {
    /// 스탑 주문 트리거 조건.
    StopOperator {
        /// 가격이 `stop-price` 이상
        Gte => "gte",
        /// 가격이 `stop-price` 이하
        Lte => "lte",
    }
}

wire_enum! {
    /// 페이지 조회 방향.
    Direct {
        Prev => "prev",
        Next => "next",
    }
}

wire_enum! {
    /// 정렬 순서.
    SortOrder {
        Asc => "asc",
        Desc => "desc",
    }
}

wire_enum! {
    /// 캔들 주기.
    KlinePeriod {
        Min1 => "1min",
        Min5 => "5min",
        Min15 => "15min",
        Min30 => "30min",
        Min60 => "60min",
        Hour4 => "4hour",
        Day1 => "1day",
        Mon1 => "1mon",
        Week1 => "1week",
        Year1 => "1year",
    }
}

wire_enum! {
    /// 호가 병합 단계 (`step0`은 병합 없음).
    #[derive(Default)]
    DepthStep {
        #[default]
        Step0 => "step0",
        Step1 => "step1",
        Step2 => "step2",
        Step3 => "step3",
        Step4 => "step4",
        Step5 => "step5",
    }
}

wire_enum! {
    /// 현물/선물 계좌 이체 방향.
    TransferDirection {
        ProToFutures => "pro-to-futures",
        FuturesToPro => "futures-to-pro",
    }
}

wire_enum! {
    /// 주문 상태.
    OrderState {
        Created => "created",
        Submitted => "submitted",
        PartialFilled => "partial-filled",
        PartialCanceled => "partial-canceled",
        Filled => "filled",
        Canceled => "canceled",
    }
}

wire_enum! {
    /// ETP 거래 유형.
    EtpTransactType {
        Creation => "creation",
        Redemption => "redemption",
    }
}

wire_enum! {
    /// ETP 거래 상태.
    EtpTransactStatus {
        Completed => "completed",
        Processing => "processing",
        Clearing => "clearing",
        Rejected => "rejected",
    }
}
