//! SeaORM queries for payment records

use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, DomainResult, Payment, PaymentStatus};
use crate::infrastructure::database::entities::payment;

pub(crate) fn payment_to_domain(m: payment::Model) -> DomainResult<Payment> {
    let status = PaymentStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Storage(format!(
            "Unknown payment status '{}' for payment {}",
            m.status, m.id
        ))
    })?;
    let amount = m.amount.parse::<Decimal>().map_err(|_| {
        DomainError::Storage(format!("Invalid amount '{}' for payment {}", m.amount, m.id))
    })?;
    Ok(Payment {
        id: m.id,
        booking_id: m.booking_id,
        amount,
        method: m.method,
        transaction_id: m.transaction_id,
        status,
        created_at: m.created_at,
    })
}

pub struct PaymentRepository;

impl PaymentRepository {
    pub async fn insert<C: ConnectionTrait>(
        conn: &C,
        booking_id: i32,
        amount: Decimal,
        method: &str,
        transaction_id: String,
    ) -> DomainResult<Payment> {
        debug!("Recording payment of {} for booking {}", amount, booking_id);
        let model = payment::ActiveModel {
            booking_id: Set(booking_id),
            amount: Set(amount.to_string()),
            method: Set(method.to_string()),
            transaction_id: Set(transaction_id),
            status: Set(PaymentStatus::Completed.as_str().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        payment_to_domain(model.insert(conn).await?)
    }

    pub async fn find_by_booking<C: ConnectionTrait>(
        conn: &C,
        booking_id: i32,
    ) -> DomainResult<Vec<Payment>> {
        let models = payment::Entity::find()
            .filter(payment::Column::BookingId.eq(booking_id))
            .order_by_asc(payment::Column::Id)
            .all(conn)
            .await?;
        models.into_iter().map(payment_to_domain).collect()
    }
}
