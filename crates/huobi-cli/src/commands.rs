//! 서브커맨드 실행.

use crate::Commands;
use anyhow::Context;
use huobi_core::{ClientConfig, Envelope, HuobiError};
use huobi_rest::{
    CancelClientOrderRequest, CancelOrderRequest, DepthRequest, EtpNavRequest,
    EtpReferenceRequest, FuturesTransferRequest, HistoryOrdersRequest, HuobiRestClient,
    KlineRequest, OpenOrdersRequest, PlaceOrderRequest,
};
use tracing::{error, info};

/// 서브커맨드를 실행하고 응답 엔벨로프를 반환.
pub(crate) async fn run(config: ClientConfig, command: Commands) -> anyhow::Result<Envelope> {
    let client = HuobiRestClient::new(config).context("클라이언트 생성 실패")?;
    info!(
        host = %client.base_url(),
        authenticated = client.has_credentials(),
        "Huobi client ready"
    );

    let result = match command {
        Commands::Depth {
            symbol,
            step,
            depth,
        } => {
            let mut request = DepthRequest::new(symbol).with_step(step);
            request.depth = depth;
            client.get_orderbook(&request).await
        }

        Commands::Klines {
            symbol,
            period,
            size,
        } => {
            let mut request = KlineRequest::new(symbol, period);
            request.size = size;
            client.get_klines(&request).await
        }

        Commands::EtpNav { symbol } => client.get_etp_nav(&EtpNavRequest { symbol }).await,

        Commands::EtpReference { etp_name } => {
            client
                .get_etp_reference(&EtpReferenceRequest { etp_name })
                .await
        }

        Commands::PlaceOrder {
            account_id,
            symbol,
            order_type,
            amount,
            price,
            source,
            client_order_id,
            stop_price,
            operator,
        } => {
            let request = PlaceOrderRequest {
                account_id,
                symbol,
                order_type,
                amount,
                price,
                source,
                client_order_id,
                stop_price,
                operator,
            };
            client.place_order(&request).await
        }

        Commands::CancelOrder {
            order_id,
            client_order_id,
        } => match (order_id, client_order_id) {
            (Some(order_id), _) => client.cancel_order(&CancelOrderRequest::new(order_id)).await,
            (None, Some(client_order_id)) => {
                client
                    .cancel_order_by_client_id(&CancelClientOrderRequest::new(client_order_id))
                    .await
            }
            (None, None) => Err(HuobiError::InvalidRequest(
                "order id or client order id is required".to_string(),
            )),
        },

        Commands::OpenOrders {
            account_id,
            symbol,
            side,
            from,
            direct,
            size,
        } => {
            let mut request = OpenOrdersRequest::new(account_id, symbol);
            request.side = side;
            request.from = from;
            request.direct = direct;
            request.size = size;
            client.get_open_orders(&request).await
        }

        Commands::HistoryOrders {
            symbol,
            states,
            types,
            start_date,
            end_date,
            size,
        } => {
            let mut request = HistoryOrdersRequest::new(symbol, states);
            request.types = types;
            request.start_date = start_date;
            request.end_date = end_date;
            request.size = size;
            client.get_history_orders(&request).await
        }

        Commands::Transfer {
            currency,
            amount,
            direction,
        } => {
            client
                .transfer_spot_futures(&FuturesTransferRequest::new(currency, amount, direction))
                .await
        }
    };

    result.map_err(|e| {
        if let Some(envelope) = e.envelope() {
            error!("Exchange rejected request: {}", envelope);
        }
        anyhow::Error::new(e)
    })
}
