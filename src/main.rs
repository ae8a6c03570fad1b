// region:    --- Imports
use auction_client::auction::model::Category;
use auction_client::client::{AuctionApi, AuctionClient};
use auction_client::config::Config;
use auction_client::error::ClientError;
use auction_client::overlay::{OverlayStore, TombstoneKind};
use auction_client::session::Session;
use auction_client::storage::FileStore;
use auction_client::views::{CatalogFilter, MyBids, MyListings, PriceRange, ProductBids};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Args
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 로그인
    Login { username: String, password: String },
    /// 회원가입 후 로그인
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// 로그아웃
    Logout,
    /// access 토큰 갱신
    Refresh,
    /// 상품 목록 (검색 / 필터)
    Products {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long, default_value = "all")]
        price: PriceRange,
    },
    /// 내 입찰과 상태
    MyBids,
    /// 내 상품
    MyListings,
    /// 상품의 입찰 이력과 내 입찰
    Bids { product_id: i64 },
    /// 입찰
    Bid { product_id: i64, amount: f64 },
    /// 내 입찰 목록에서 숨김 (로컬)
    HideBid { bid_id: i64 },
    /// 내 상품 목록에서 숨김 (로컬)
    DeleteListing { product_id: i64 },
    /// 입찰 삭제 (서버)
    DeleteBid { product_id: i64, bid_id: i64 },
    /// 낙찰 처리
    Sell { product_id: i64, bid_id: i64 },
}

// endregion: --- Args

// region:    --- Main
#[tokio::main]
async fn main() {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args.command).await {
        error!("{:<12} --> {}", "Main", e);
        let info = e.info();
        eprintln!(
            "{}",
            serde_json::to_string(&info).unwrap_or_else(|_| info.message.clone())
        );
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), ClientError> {
    let config = Config::from_env()?;
    let store = Arc::new(FileStore::open(&config.store_path)?);
    info!(
        "{:<12} --> 저장소: {}, API: {}",
        "Main",
        store.path().display(),
        config.api_url
    );

    let session = Session::new(store.clone());
    let overlay = OverlayStore::new(store);
    let client = Arc::new(AuctionClient::new(&config, session)?);

    match command {
        Command::Login { username, password } => {
            let auth = client.login(&username, &password).await?;
            print_json(&auth.user)
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let auth = client.register(&username, &email, &password).await?;
            print_json(&auth.user)
        }
        Command::Logout => {
            client.logout().await;
            Ok(())
        }
        Command::Refresh => {
            client.refresh_token().await?;
            Ok(())
        }
        Command::Products {
            query,
            category,
            price,
        } => {
            let products = client.list_products().await?;
            let filter = CatalogFilter {
                query,
                category,
                price,
            };
            print_json(&filter.apply(&products))
        }
        Command::MyBids => {
            client.session().require_auth()?;
            let cancel = CancellationToken::new();
            let on_ctrl_c = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_ctrl_c.cancel();
                }
            });
            let page = MyBids::load(client, overlay, &cancel).await?;
            print_json(&page.bids)
        }
        Command::MyListings => {
            let page = MyListings::load(client.as_ref(), overlay).await?;
            print_json(&page.listings)
        }
        Command::Bids { product_id } => {
            let page = ProductBids::load(client.as_ref(), product_id).await?;
            print_json(&serde_json::json!({
                "history": page.history,
                "mine": page.mine,
                "highest": page.highest,
            }))
        }
        Command::Bid { product_id, amount } => {
            let bid = client.place_bid(product_id, amount).await?;
            print_json(&bid)
        }
        Command::HideBid { bid_id } => {
            let hidden = overlay.hide_one(TombstoneKind::Bids, bid_id)?;
            print_json(&hidden)
        }
        Command::DeleteListing { product_id } => {
            let hidden = overlay.hide_one(TombstoneKind::Products, product_id)?;
            print_json(&hidden)
        }
        Command::DeleteBid { product_id, bid_id } => {
            let mut page = ProductBids::load(client.as_ref(), product_id).await?;
            page.delete_my_bid(client.as_ref(), bid_id).await?;
            print_json(&page.mine)
        }
        Command::Sell { product_id, bid_id } => {
            let mut page = MyListings::load(client.as_ref(), overlay).await?;
            page.sell(client.as_ref(), product_id, bid_id).await?;
            print_json(&page.listings)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), ClientError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// endregion: --- Main
