//! ドメイン層の値オブジェクト

use std::fmt;

use uuid::Uuid;

use super::DomainError;

/// 表示名の最大文字数（バイト数ではなく文字数）
pub const MAX_DISPLAY_NAME_CHARS: usize = 20;

/// 接続 ID（トランスポート層が接続ごとに割り当てる不透明な識別子）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    pub(crate) fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 表示名（前後の空白を除いた 1〜20 文字）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayName(String);

impl DisplayName {
    /// 厳密なコンストラクタ（整形済みの値のみ受け付ける）
    pub fn new(value: String) -> Result<Self, DomainError> {
        match Self::sanitize(&value) {
            Some(name) if name.0 == value => Ok(name),
            _ => Err(DomainError::InvalidDisplayName(value)),
        }
    }

    /// 前後の空白を除き、[`MAX_DISPLAY_NAME_CHARS`] 文字までに切り詰める
    ///
    /// 切り詰めた結果の末尾に残った空白も除く。何も残らなければ `None`
    /// （呼び出し側は以前の名前を維持する）。
    pub fn sanitize(raw: &str) -> Option<Self> {
        let truncated: String = raw.trim().chars().take(MAX_DISPLAY_NAME_CHARS).collect();
        let trimmed = truncated.trim_end();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub(crate) fn from_default_suffix(suffix: u16) -> Self {
        Self(format!("Player{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// スコア（0 以上の整数）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u32);

impl Score {
    pub const ZERO: Score = Score(0);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// ラウンドの長さ（正の秒数）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundDuration(u32);

impl RoundDuration {
    pub fn from_secs(secs: u32) -> Result<Self, DomainError> {
        if secs == 0 {
            return Err(DomainError::NonPositiveDuration);
        }
        Ok(Self(secs))
    }

    /// クライアントが要求した秒数からラウンドの長さを決める
    ///
    /// 未指定・0 以下なら `default`。`u32` に収まらない値は飽和させる。
    pub fn from_requested(requested: Option<i64>, default: RoundDuration) -> Self {
        match requested {
            Some(secs) if secs > 0 => Self(u32::try_from(secs).unwrap_or(u32::MAX)),
            _ => default,
        }
    }

    pub fn as_secs(self) -> u32 {
        self.0
    }

    pub fn as_millis(self) -> u64 {
        u64::from(self.0) * 1000
    }
}

impl Default for RoundDuration {
    fn default() -> Self {
        Self(30)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}
