use chrono::{
    DateTime, Duration, FixedOffset, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};

/// Clock abstracts access to the current instant and the local calendar so the
/// ledger stays deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Projects an instant onto the local wall clock.
    fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime;

    /// Resolves a local wall-clock time back to an instant. Ambiguous times pick
    /// the earliest candidate.
    fn from_local(&self, local: NaiveDateTime) -> DateTime<Utc>;

    /// Local calendar day an instant falls on.
    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.to_local(instant).date()
    }

    /// Returns the current local date. Defaults to `local_date(now())`.
    fn today(&self) -> NaiveDate {
        self.local_date(self.now())
    }

    /// First instant of the given local day.
    fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        self.from_local(date.and_time(NaiveTime::MIN))
    }

    /// Instant `months` calendar months before `instant`, measured on the local
    /// wall clock. Falls back to 30-day steps when the month arithmetic overflows.
    fn months_before(&self, instant: DateTime<Utc>, months: u32) -> DateTime<Utc> {
        let local = self.to_local(instant);
        match local.checked_sub_months(Months::new(months)) {
            Some(shifted) => self.from_local(shifted),
            None => instant - Duration::days(30 * i64::from(months)),
        }
    }
}

fn resolve_local<Tz: TimeZone>(zone: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    zone.from_local_datetime(&local)
        .earliest()
        .map(|resolved| resolved.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&local))
}

/// Real-time clock backed by the host's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&Local).naive_local()
    }

    fn from_local(&self, local: NaiveDateTime) -> DateTime<Utc> {
        resolve_local(&Local, local)
    }
}

/// Clock pinned to a single instant in a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { instant, offset }
    }

    /// Clock at `instant` with UTC as the local zone.
    pub fn utc(instant: DateTime<Utc>) -> Self {
        Self::new(instant, Utc.fix())
    }

    /// Clock at the given local wall-clock time in a zone `offset_hours` east of UTC.
    pub fn at_local(local: NaiveDateTime, offset_hours: i32) -> Self {
        let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap_or(Utc.fix());
        Self::new(resolve_local(&offset, local), offset)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn advance(&mut self, delta: Duration) {
        self.instant += delta;
    }

    pub fn set(&mut self, instant: DateTime<Utc>) {
        self.instant = instant;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.offset).naive_local()
    }

    fn from_local(&self, local: NaiveDateTime) -> DateTime<Utc> {
        resolve_local(&self.offset, local)
    }
}
