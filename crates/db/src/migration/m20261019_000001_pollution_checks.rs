//! Pollution checks migration.
//!
//! Creates the append-only table of issued checks.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(POLLUTION_CHECKS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS pollution_checks CASCADE;")
            .await?;
        Ok(())
    }
}

const POLLUTION_CHECKS_SQL: &str = r"
CREATE TABLE pollution_checks (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    vehicle_no TEXT NOT NULL,
    vehicle_type VARCHAR(10) NOT NULL,
    wheels SMALLINT NOT NULL,
    duration_months SMALLINT NOT NULL,
    price NUMERIC(10, 2) NOT NULL,
    check_date TIMESTAMPTZ NOT NULL,
    expiry_date TIMESTAMPTZ NOT NULL,
    CONSTRAINT chk_vehicle_type CHECK (vehicle_type IN ('petrol', 'diesel')),
    CONSTRAINT chk_wheels CHECK (wheels IN (2, 3, 4)),
    CONSTRAINT chk_duration CHECK (duration_months IN (6, 12)),
    CONSTRAINT chk_price_positive CHECK (price > 0),
    CONSTRAINT chk_expiry_after_check CHECK (expiry_date > check_date),
    CONSTRAINT chk_no_diesel_two_wheelers CHECK (NOT (wheels = 2 AND vehicle_type = 'diesel'))
);

-- Report windows filter on check_date
CREATE INDEX idx_pollution_checks_check_date ON pollution_checks(check_date);

-- Lookup by vehicle
CREATE INDEX idx_pollution_checks_vehicle ON pollution_checks(vehicle_no, check_date DESC);
";
